//! macOS port
//!
//! Builds on the unix port. Differences:
//! - SDL comes in through the regular make build, so `build_sdl` adds nothing.
//! - Checkouts are shared with the unix port run earlier in the session, so
//!   `submodules` does nothing. Running this port alone on a fresh tree is
//!   unsupported; the pipeline driver's preflight reports it.
//! - After compile the SDL dylib is copied next to the firmware.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::args::BuildArgs;
use crate::core::build_config::BuildConfig;
use crate::core::clean::CleanResult;
use crate::core::commands::{BuildCommand, CommandSet};
use crate::core::port::unix::UnixPort;
use crate::core::port::{BuildPort, PipelineContext};
use crate::error::{ArgumentError, CompileError, FilesystemError, ManifestError, PortError};
use crate::infra::artifact::{self, ArtifactCopy};
use crate::infra::runner::CommandRunner;

/// macOS specialization of the unix port
#[derive(Debug)]
pub struct MacOsPort<R> {
    base: UnixPort<R>,
}

impl<R: CommandRunner> MacOsPort<R> {
    /// Claim the `macOS` identity on `config` and build the delegate
    pub fn new(config: BuildConfig, runner: R) -> Result<Self, PortError> {
        let config = config.claim(defaults::MACOS_PORT)?;
        let base = UnixPort::new(config, runner)?;
        Ok(Self { base })
    }

    /// The unix delegate
    pub fn base(&self) -> &UnixPort<R> {
        &self.base
    }

    /// Destination of the SDL dylib in the output directory
    pub fn dylib_output(&self) -> PathBuf {
        self.config().paths().output.join(defaults::SDL_DYLIB)
    }

    /// Copy the SDL dylib out of the variant build dir, if it was built
    pub fn copy_sdl_dylib(&self) -> Result<Option<ArtifactCopy>, FilesystemError> {
        let source = self
            .config()
            .variant_build_dir()
            .join(defaults::SDL_BUILD_SUBDIR)
            .join(defaults::SDL_DYLIB);
        artifact::copy_if_present(&source, &self.dylib_output())
    }
}

impl<R: CommandRunner> BuildPort for MacOsPort<R> {
    fn config(&self) -> &BuildConfig {
        self.base.config()
    }

    fn parse_args(
        &self,
        extra_args: &[String],
        lv_cflags: &str,
        board: Option<&str>,
    ) -> Result<BuildArgs, ArgumentError> {
        self.base.parse_args(extra_args, lv_cflags, board)
    }

    fn build_commands(&self, ctx: &PipelineContext, args: &BuildArgs) -> CommandSet {
        self.base.assemble_commands(self, ctx, args)
    }

    fn build_manifest(
        &self,
        ctx: &PipelineContext,
        lvgl_api: bool,
        displays: &[String],
        indevs: &[String],
        frozen_manifest: Option<&Path>,
    ) -> Result<PathBuf, ManifestError> {
        self.base
            .build_manifest(ctx, lvgl_api, displays, indevs, frozen_manifest)
    }

    fn compile(&self, commands: &CommandSet) -> Result<(), PortError> {
        self.base.compile(commands)?;
        self.copy_sdl_dylib()?;
        Ok(())
    }

    fn mpy_cross(&self) -> Result<(), CompileError> {
        self.base.mpy_cross()
    }

    fn clean(&self) -> Result<CleanResult, FilesystemError> {
        self.base.clean()
    }

    fn force_clean(&self, clean_mpy_cross: bool) -> Result<CleanResult, FilesystemError> {
        self.base.force_clean(clean_mpy_cross)
    }

    fn submodules(&self) -> Result<(), CompileError> {
        Ok(())
    }

    fn build_sdl(&self, _addl_commands: &mut Vec<BuildCommand>) {}
}
