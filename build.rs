//! Build script for Campaign Desk
//!
//! With the `ui` feature the frontend is embedded from `ui/dist/`, which is
//! produced by `trunk build`. This script warns when trunk or the built
//! assets are missing.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    #[cfg(feature = "ui")]
    {
        check_ui_assets();
        println!("cargo:rerun-if-changed=ui/dist/");
        println!("cargo:rerun-if-changed=ui/src/");
        println!("cargo:rerun-if-changed=ui/index.html");
        println!("cargo:rerun-if-changed=ui/Cargo.toml");
    }
}

#[cfg(feature = "ui")]
fn check_ui_assets() {
    use std::process::Command;

    let trunk = Command::new("trunk")
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string());

    match trunk {
        Some(version) => println!("cargo:warning=Campaign Desk UI: found {}", version),
        None => {
            println!("cargo:warning=Campaign Desk UI: trunk not found");
            println!("cargo:warning=  install with: cargo install trunk");
        }
    }

    let ui_dist = std::path::Path::new("ui/dist");
    if !ui_dist.join("index.html").exists() {
        println!("cargo:warning=UI assets not found in ui/dist/");
        println!("cargo:warning=  build them first: cd ui && trunk build --release");
        // rust-embed needs the folder to exist even when empty
        if let Err(e) = std::fs::create_dir_all(ui_dist) {
            println!("cargo:warning=  could not create ui/dist: {}", e);
        }
    }
}
