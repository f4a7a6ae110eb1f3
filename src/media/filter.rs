use std::path::Path;

/// Extensions we can display (compared lower-cased)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Is `path` a regular file with one of the supported image extensions?
///
/// Symlinks are followed, so a link to a picture counts and a link to a
/// folder does not.
pub fn is_displayable_image(path: &Path) -> bool {
    path.is_file() && has_image_extension(path)
}

/// Extension check only, no filesystem access
pub fn has_image_extension(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_extension_is_case_insensitive() {
        for name in ["a.jpg", "a.JPG", "a.Jpg", "a.jpeg", "a.PNG", "a.gif", "a.WebP"] {
            assert!(has_image_extension(Path::new(name)), "{name} should match");
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["a.txt", "a.tiff", "a.nef", "jpg", "a.jpg.bak", ".png"] {
            assert!(!has_image_extension(Path::new(name)), "{name} should not match");
        }
    }

    #[test]
    fn test_regular_file_passes() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("photo.JPG");
        fs::write(&file, b"not really a jpeg").unwrap();
        assert!(is_displayable_image(&file));
    }

    #[test]
    fn test_directory_with_image_name_is_rejected() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("album.png");
        fs::create_dir(&sub).unwrap();
        assert!(!is_displayable_image(&sub));
    }

    #[test]
    fn test_extensionless_file_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("README");
        fs::write(&file, b"hello").unwrap();
        assert!(!is_displayable_image(&file));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(!is_displayable_image(&dir.path().join("gone.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        let link = dir.path().join("link.jpg");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(!is_displayable_image(&link));
    }
}
