//! `skyhunt images` — list images compatible with a shape

use colored::Colorize;
use skyhunt_cloud::{ComputeProvider, ImageInfo};
use skyhunt_config::HuntSettings;
use std::collections::BTreeMap;

const IMAGES_PER_OS: usize = 5;

/// A1 shapes are aarch64; E2 micro is x86. Anything else takes every
/// image (coarse, but matches how the shape families split).
fn compatible(shape: &str, image: &ImageInfo) -> bool {
    let aarch64 = image.display_name.to_lowercase().contains("aarch64");
    if shape.contains("A1") {
        aarch64
    } else if shape.contains("E2") {
        !aarch64
    } else {
        true
    }
}

pub async fn handle(
    settings: &HuntSettings,
    provider: &dyn ComputeProvider,
    shape: Option<String>,
    os: Option<String>,
) -> anyhow::Result<i32> {
    let shape = shape.unwrap_or_else(|| settings.shape.clone());
    println!("Shape: {}", shape.yellow());
    if let Some(os) = &os {
        println!("OS filter: {}", os.yellow());
    }
    println!();

    let images = provider.list_images(os.as_deref()).await?;
    let compatible: Vec<_> = images
        .into_iter()
        .filter(|img| compatible(&shape, img))
        .collect();

    if compatible.is_empty() {
        println!("{}", "No compatible images found.".yellow());
        println!("Try a different --os filter or check the shape name.");
        return Ok(1);
    }

    let mut by_os: BTreeMap<String, Vec<&ImageInfo>> = BTreeMap::new();
    for image in &compatible {
        let key = image
            .operating_system
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        by_os.entry(key).or_default().push(image);
    }

    for (os_name, group) in &by_os {
        println!("{}", os_name.magenta().bold());
        for image in group.iter().take(IMAGES_PER_OS) {
            println!("  {} {}", "•".green(), image.display_name);
            println!("    OCID: {}", image.id.yellow());
        }
        println!();
    }

    println!("Copy the OCID of your preferred image into {}.", "image_id".cyan());
    Ok(0)
}
