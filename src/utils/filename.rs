use crate::error::{ProcessingError, Result};
use crate::utils::constants::{JSON_CACHE_EXTENSION, RESULT_SUFFIX};
use std::path::{Path, PathBuf};

/// Leading `_`-separated token of a file's stem, e.g. `temp_xoplaki_sp.txt` -> `temp`
pub fn dataset_token(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("Invalid file path: {}", path.display()))
        })?;

    match stem.split('_').next() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ProcessingError::InvalidFormat(format!(
            "Cannot derive a dataset name from file: {}",
            path.display()
        ))),
    }
}

/// Result CSV path: `<output_dir>/<spring token>_result.csv`, defaulting to the
/// spring file's own directory
pub fn result_csv_path(spring_file: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let token = dataset_token(spring_file)?;
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| parent_dir(spring_file));
    Ok(dir.join(format!("{}{}", token, RESULT_SUFFIX)))
}

/// JSON cache written beside an input file
pub fn json_cache_path(input: &Path) -> PathBuf {
    input.with_extension(JSON_CACHE_EXTENSION)
}

/// Debug map image path: `<output_dir>/<category>_map_<year>.png`
pub fn map_image_path(spring_file: &Path, output_dir: Option<&Path>, year: &str) -> Result<PathBuf> {
    let token = dataset_token(spring_file)?;
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| parent_dir(spring_file));
    Ok(dir.join(format!("{}_map_{}.png", token, year)))
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_token() {
        assert_eq!(
            dataset_token(Path::new("data/temp_xoplaki_sp.txt")).unwrap(),
            "temp"
        );
        assert_eq!(
            dataset_token(Path::new("prec_pauling_su.txt")).unwrap(),
            "prec"
        );
        assert_eq!(dataset_token(Path::new("plain.txt")).unwrap(), "plain");
        assert!(dataset_token(Path::new("_leading.txt")).is_err());
    }

    #[test]
    fn test_result_csv_path_defaults_to_input_dir() {
        let path = result_csv_path(Path::new("data/temp_xoplaki_sp.txt"), None).unwrap();
        assert_eq!(path, PathBuf::from("data/temp_result.csv"));

        let path = result_csv_path(Path::new("temp_xoplaki_sp.txt"), None).unwrap();
        assert_eq!(path, PathBuf::from("./temp_result.csv"));
    }

    #[test]
    fn test_result_csv_path_with_output_dir() {
        let path =
            result_csv_path(Path::new("data/prec_pauling_sp.txt"), Some(Path::new("out"))).unwrap();
        assert_eq!(path, PathBuf::from("out/prec_result.csv"));
    }

    #[test]
    fn test_json_cache_path() {
        assert_eq!(
            json_cache_path(Path::new("data/temp_luterbacher_su.txt")),
            PathBuf::from("data/temp_luterbacher_su.json")
        );
    }

    #[test]
    fn test_map_image_path() {
        let path = map_image_path(Path::new("data/temp_x_sp.txt"), None, "1500").unwrap();
        assert_eq!(path, PathBuf::from("data/temp_map_1500.png"));
    }
}
