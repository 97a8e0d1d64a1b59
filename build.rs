#[cfg(windows)]
fn main() {
    let mut res = winres::WindowsResource::new();

    // Add icon if it exists
    if std::path::Path::new("icon.ico").exists() {
        res.set_icon("icon.ico");
    }

    let version = env!("CARGO_PKG_VERSION");

    res.set("ProductName", "Nextcloud Upload")
        .set("FileDescription", "Upload files to Nextcloud public shares")
        .set("OriginalFilename", "nextcloud-upload.exe")
        .set("FileVersion", version)
        .set("ProductVersion", version);

    if let Err(e) = res.compile() {
        eprintln!("Warning: Failed to set Windows resource metadata: {}", e);
    }
}

#[cfg(not(windows))]
fn main() {
    // No-op for non-Windows builds
}
