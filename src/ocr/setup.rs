use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::paths::get_tesseract_dir;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Language Tesseract falls back to when no `-l` is given.
pub const DEFAULT_LANGUAGE: &str = "eng";

const COMMON_EXECUTABLES: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

const SYSTEM_TESSDATA: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

#[derive(Debug, Clone)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    /// Directory holding every requested language; `None` lets Tesseract
    /// use its compiled-in default.
    pub tessdata: Option<PathBuf>,
}

/// Resolves the Tesseract executable and a tessdata directory that holds
/// all of `languages`.
///
/// Missing language files are copied from a system install when one has
/// them, otherwise downloaded into the local tessdata dir when `download`
/// is set.
pub fn ensure_tesseract(
    executable_override: Option<&Path>,
    languages: &[&str],
    download: bool,
) -> Result<TesseractPaths> {
    let executable = match executable_override {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => {
            return Err(anyhow!(
                "Configured Tesseract executable does not exist: {}",
                path.display()
            ));
        }
        None => find_tesseract_executable()?,
    };
    info!("Tesseract executable: {}", executable.display());

    if let Some(dir) = find_tessdata_dir(languages) {
        info!("Tessdata found at: {}", dir.display());
        return Ok(TesseractPaths {
            executable,
            tessdata: Some(dir),
        });
    }

    let local = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&local)?;

    for lang in languages {
        let target = traineddata_path(&local, lang);
        if target.exists() {
            continue;
        }
        if copy_from_system(lang, &target)? {
            continue;
        }
        if !download {
            warn!(
                "{}.traineddata missing and downloads are disabled; using Tesseract's default data dir",
                lang
            );
            return Ok(TesseractPaths {
                executable,
                tessdata: None,
            });
        }
        download_tessdata(lang, &target)?;
    }

    info!("Tessdata ready at: {}", local.display());
    Ok(TesseractPaths {
        executable,
        tessdata: Some(local),
    })
}

fn traineddata_path(dir: &Path, lang: &str) -> PathBuf {
    dir.join(format!("{}.traineddata", lang))
}

fn holds_all(dir: &Path, languages: &[&str]) -> bool {
    languages
        .iter()
        .all(|lang| traineddata_path(dir, lang).exists())
}

/// Finds the Tesseract executable, checking our local dir first, then PATH,
/// then common install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let local_dir = get_tesseract_dir();
    for name in ["tesseract.exe", "tesseract"] {
        let local_exe = local_dir.join(name);
        if local_exe.is_file() {
            return Ok(local_exe);
        }
    }

    if let Ok(output) = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
    {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in COMMON_EXECUTABLES {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a tessdata directory containing every language in `languages`.
///
/// Checks the local dir, `TESSDATA_PREFIX`, then system install paths.
pub fn find_tessdata_dir(languages: &[&str]) -> Option<PathBuf> {
    let mut candidates = vec![get_tesseract_dir().join("tessdata")];

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        candidates.push(PathBuf::from(&prefix));
        candidates.push(PathBuf::from(&prefix).join("tessdata"));
    }

    candidates.extend(SYSTEM_TESSDATA.iter().map(PathBuf::from));

    candidates.into_iter().find(|dir| holds_all(dir, languages))
}

/// Copies `<lang>.traineddata` from the first system tessdata dir that has it.
fn copy_from_system(lang: &str, target: &Path) -> Result<bool> {
    for dir in SYSTEM_TESSDATA {
        let source = traineddata_path(Path::new(dir), lang);
        if source.exists() {
            info!("Copying {}.traineddata from: {}", lang, source.display());
            fs::copy(&source, target)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Downloads `<lang>.traineddata` from the tessdata repository.
fn download_tessdata(lang: &str, target: &Path) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, lang);
    info!("Downloading {}.traineddata...", lang);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "poker-table-ocr")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            lang,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(target)?;
    file.write_all(&bytes)?;

    info!("Downloaded {}.traineddata ({} bytes)", lang, bytes.len());

    Ok(())
}
