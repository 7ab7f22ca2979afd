//! Encoder provisioning.
//!
//! Before any file is touched the run needs a usable ffmpeg binary. An
//! `EncoderProvider` resolves one: a path given by the user, the `ffmpeg` on
//! `PATH`, or a static build downloaded once into a local tools directory.
//! Every failure here is a setup error that aborts the run.

use crate::error::{CoreError, CoreResult};
use crate::external::check_dependency;

use ffmpeg_sidecar::download::{download_ffmpeg_package, ffmpeg_download_url, unpack_ffmpeg};
use log::{debug, info};

use std::fs;
use std::path::{Path, PathBuf};

/// Capability that yields the path of a runnable ffmpeg binary.
pub trait EncoderProvider {
    /// Makes sure the encoder is present and returns its path.
    fn ensure_available(&self) -> CoreResult<PathBuf>;
}

/// An explicitly configured ffmpeg binary.
#[derive(Debug, Clone)]
pub struct ConfiguredEncoder {
    path: PathBuf,
}

impl ConfiguredEncoder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl EncoderProvider for ConfiguredEncoder {
    fn ensure_available(&self) -> CoreResult<PathBuf> {
        if !self.path.is_file() {
            return Err(CoreError::DependencyNotFound(self.path.display().to_string()));
        }
        debug!("Using configured ffmpeg at {}", self.path.display());
        Ok(self.path.clone())
    }
}

/// The `ffmpeg` found on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemEncoder;

impl EncoderProvider for SystemEncoder {
    fn ensure_available(&self) -> CoreResult<PathBuf> {
        let binary = PathBuf::from("ffmpeg");
        check_dependency(&binary)?;
        Ok(binary)
    }
}

/// A static ffmpeg build cached in `tools_dir`, downloaded on first use.
#[derive(Debug, Clone)]
pub struct DownloadingEncoder {
    tools_dir: PathBuf,
}

impl DownloadingEncoder {
    pub fn new(tools_dir: PathBuf) -> Self {
        Self { tools_dir }
    }

    /// Where the cached binary lives.
    #[must_use]
    pub fn cached_binary(&self) -> PathBuf {
        binary_in(&self.tools_dir)
    }

    fn download(&self) -> CoreResult<()> {
        fs::create_dir_all(&self.tools_dir)?;

        let url = ffmpeg_download_url().map_err(provisioning_error)?;
        info!("Downloading FFmpeg from {url} (this may take a moment)...");

        let staging = tempfile::Builder::new()
            .prefix("ffmpeg_download")
            .tempdir_in(&self.tools_dir)?;
        let archive = download_ffmpeg_package(url, staging.path()).map_err(provisioning_error)?;
        debug!("Downloaded archive to {}", archive.display());

        unpack_ffmpeg(&archive, &self.tools_dir).map_err(provisioning_error)?;
        Ok(())
    }
}

impl EncoderProvider for DownloadingEncoder {
    fn ensure_available(&self) -> CoreResult<PathBuf> {
        let cached = self.cached_binary();
        if cached.is_file() {
            info!("FFmpeg already exists at {}", cached.display());
            return Ok(cached);
        }

        self.download()?;

        if !cached.is_file() {
            return Err(CoreError::ToolProvisioning(format!(
                "Archive did not contain an ffmpeg binary (expected {})",
                cached.display()
            )));
        }
        info!("FFmpeg downloaded and extracted to {}", cached.display());
        Ok(cached)
    }
}

fn binary_in(dir: &Path) -> PathBuf {
    dir.join(format!("ffmpeg{}", std::env::consts::EXE_SUFFIX))
}

fn provisioning_error(err: anyhow::Error) -> CoreError {
    CoreError::ToolProvisioning(format!("{err:#}"))
}
