use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Project manifest (rill.toml)
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub package: PackageInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    #[serde(default = "default_entry")]
    pub entry: String,
}

fn default_entry() -> String {
    "src/main.rill".to_string()
}

impl ProjectManifest {
    /// Create a new manifest with default values
    pub fn new(name: &str) -> Self {
        Self {
            package: PackageInfo {
                name: name.to_string(),
                version: "0.1.0".to_string(),
                entry: default_entry(),
            },
        }
    }

    /// Load manifest from a directory
    pub fn load(dir: &Path) -> Result<Self, String> {
        let manifest_path = dir.join("rill.toml");
        let content = fs::read_to_string(&manifest_path)
            .map_err(|e| format!("failed to read rill.toml: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse rill.toml: {}", e))
    }

    /// Save manifest to a directory
    pub fn save(&self, dir: &Path) -> Result<(), String> {
        let manifest_path = dir.join("rill.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize rill.toml: {}", e))?;
        fs::write(&manifest_path, content)
            .map_err(|e| format!("failed to write rill.toml: {}", e))
    }
}

/// Initialize a new rill project
pub fn init_project(dir: &Path, name: Option<&str>) -> Result<(), String> {
    let project_name = name
        .map(|s| s.to_string())
        .or_else(|| dir.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "myproject".to_string());

    let manifest_path = dir.join("rill.toml");
    if manifest_path.exists() {
        return Err(format!("rill.toml already exists in {}", dir.display()));
    }

    let src_dir = dir.join("src");
    fs::create_dir_all(&src_dir).map_err(|e| format!("failed to create src directory: {}", e))?;

    let manifest = ProjectManifest::new(&project_name);
    manifest.save(dir)?;

    let main_rill = src_dir.join("main.rill");
    if !main_rill.exists() {
        let content = r#"// Welcome to rill!
print "Hello, world!";
"#;
        fs::write(&main_rill, content)
            .map_err(|e| format!("failed to write main.rill: {}", e))?;
    }

    println!(
        "Created new rill project '{}' in {}",
        project_name,
        dir.display()
    );
    Ok(())
}
