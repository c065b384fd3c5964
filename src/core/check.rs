use serde::Serialize;

use crate::config::Toolchain;
use crate::error::Result;
use crate::executor::CommandRunner;
use crate::image;
use crate::registry;

#[derive(Debug, Clone, Serialize)]
pub struct TagCheckResult {
    pub image: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
}

/// Report the registry's tags for `image_name`, and whether `tag` is among them.
pub fn run(
    runner: &CommandRunner,
    toolchain: &Toolchain,
    image_name: &str,
    tag: Option<&str>,
) -> Result<TagCheckResult> {
    let image_name = image::validate_name(image_name)?;
    if let Some(tag) = tag {
        image::validate_tag(tag, "tag")?;
    }

    let listing = registry::list_tags(runner, toolchain, image_name)?;
    let found = tag.map(|t| listing.contains(t));

    Ok(TagCheckResult {
        image: image_name.to_string(),
        tags: listing.tags.into_iter().collect(),
        tag: tag.map(str::to_string),
        found,
    })
}
