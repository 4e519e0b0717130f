use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

/// Card images live in `assets/`. They are optional: a missing image is drawn
/// as a checkerboard at runtime, so the build never fails over them.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if !assets_src.exists() {
        return Ok(());
    }

    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&[assets_src], out_dir, &copy_options)?;

    Ok(())
}
