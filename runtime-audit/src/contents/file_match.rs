//! Tracked file matches.

use serde::Serialize;

/// A file in a repository whose path ends in a tracked extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatch {
    /// Repository name.
    pub repository: String,

    /// Path of the file relative to the repository root.
    pub path: String,
}

/// Returns the tracked files among `paths`, in the given order.
#[must_use]
pub fn matching_files<S: AsRef<str>>(
    repository: &str,
    paths: &[S],
    extensions: &[String],
) -> Vec<FileMatch> {
    paths
        .iter()
        .map(|path| AsRef::<str>::as_ref(path))
        .filter(|path| extensions.iter().any(|ext| path.ends_with(ext.as_str())))
        .map(|path| FileMatch {
            repository: repository.to_string(),
            path: path.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_tracked_extensions() {
        let paths = [
            "main.tf",
            "README.md",
            "modules/lambda/variables.tf",
            "terraform.tfvars",
            "main.tf.bak",
        ];

        let matches = matching_files("orders-lambda", &paths, &[".tf".to_string()]);

        let found: Vec<_> = matches.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(found, ["main.tf", "modules/lambda/variables.tf"]);
        assert!(matches.iter().all(|m| m.repository == "orders-lambda"));
    }

    #[test]
    fn supports_several_extensions() {
        let paths = ["main.tf", "terragrunt.hcl", "app.py"];
        let extensions = [".tf".to_string(), ".hcl".to_string()];

        assert_eq!(matching_files("infra", &paths, &extensions).len(), 2);
    }
}
