//! Reference port
//!
//! Drives the MicroPython unix port: make for the firmware, cmake for SDL,
//! git for submodules. Every other port is built by delegating to this one.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::args::{self, BuildArgs};
use crate::core::build_config::BuildConfig;
use crate::core::clean::{self, CleanResult};
use crate::core::commands::{BuildCommand, CommandSet};
use crate::core::manifest::{self, ManifestRequest};
use crate::core::port::{BuildPort, PipelineContext};
use crate::error::{
    ArgumentError, CompileError, FilesystemError, ManifestError, PortError, PreconditionError,
};
use crate::infra::artifact::{self, ArtifactCopy};
use crate::infra::filesystem;
use crate::infra::runner::CommandRunner;

/// The reference pipeline
#[derive(Debug)]
pub struct UnixPort<R> {
    config: BuildConfig,
    runner: R,
}

impl<R: CommandRunner> UnixPort<R> {
    /// Take ownership of `config` and prepare the port's working tree
    pub fn new(config: BuildConfig, runner: R) -> Result<Self, FilesystemError> {
        filesystem::create_dir_all(&config.originals_dir())?;
        tracing::debug!(
            "Port {} ready (variant {})",
            config.port_name(),
            config.variant()
        );
        Ok(Self { config, runner })
    }

    /// Runner used for external commands
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Assemble the command set, calling `build_sdl` on `hooks`
    ///
    /// `hooks` is the outermost port, so a specialization that replaces
    /// `build_sdl` gets its version called here.
    pub fn assemble_commands<P>(&self, hooks: &P, ctx: &PipelineContext, args: &BuildArgs) -> CommandSet
    where
        P: BuildPort + ?Sized,
    {
        let config = &self.config;

        let mut commands = Vec::new();
        hooks.build_sdl(&mut commands);

        let mut make = BuildCommand::new("make")
            .arg("-C")
            .arg(config.port_dir().display().to_string())
            .arg(format!("-j{}", config.jobs()))
            .arg(format!("VARIANT={}", config.variant()))
            .arg(format!("LV_PORT={}", config.port_name()))
            .arg(format!(
                "USER_C_MODULES={}",
                ctx.script_dir.join(defaults::USER_C_MODULES_DIR).display()
            ))
            .arg(format!("FROZEN_MANIFEST={}", ctx.manifest_path().display()));
        if let Some(ref board) = args.board {
            make = make.arg(format!("BOARD={board}"));
        }
        if !args.lv_cflags.is_empty() {
            make = make.arg(format!("LV_CFLAGS={}", args.lv_cflags));
        }
        commands.push(make.args(args.extra_args.iter().cloned()));

        CommandSet {
            port_name: config.port_name().to_string(),
            variant: config.variant().to_string(),
            passthrough: ctx.passthrough.clone(),
            commands,
        }
    }

    fn check_fresh(&self, commands: &CommandSet) -> Result<(), PreconditionError> {
        if commands.port_name == self.config.port_name() && commands.variant == self.config.variant() {
            return Ok(());
        }
        Err(PreconditionError::StaleCommandSet {
            expected_port: self.config.port_name().to_string(),
            expected_variant: self.config.variant().to_string(),
            found_port: commands.port_name.clone(),
            found_variant: commands.variant.clone(),
        })
    }

    /// Where the firmware binary lands after compile
    pub fn firmware_output(&self) -> PathBuf {
        self.config.paths().output.join(format!(
            "{}{}",
            defaults::FIRMWARE_OUTPUT_PREFIX,
            self.config.port_name()
        ))
    }

    /// Copy the firmware binary to the output directory if it was built
    pub fn copy_firmware(&self) -> Result<Option<ArtifactCopy>, FilesystemError> {
        let source = self.config.variant_build_dir().join(defaults::FIRMWARE_BINARY);
        let copied = artifact::copy_if_present(&source, &self.firmware_output())?;
        match copied {
            Some(_) => {}
            None if self.runner.executes() => {
                tracing::warn!("Firmware {} not found after compile", source.display());
            }
            None => tracing::debug!("Firmware {} not built (dry run)", source.display()),
        }
        Ok(copied)
    }

    fn submodule_paths(&self) -> [&Path; 3] {
        let paths = self.config.paths();
        [
            paths.micropython.as_path(),
            paths.lvgl.as_path(),
            paths.sdl.as_path(),
        ]
    }
}

impl<R: CommandRunner> BuildPort for UnixPort<R> {
    fn config(&self) -> &BuildConfig {
        &self.config
    }

    fn parse_args(
        &self,
        extra_args: &[String],
        lv_cflags: &str,
        board: Option<&str>,
    ) -> Result<BuildArgs, ArgumentError> {
        args::parse(&self.config, extra_args, lv_cflags, board)
    }

    fn build_commands(&self, ctx: &PipelineContext, args: &BuildArgs) -> CommandSet {
        self.assemble_commands(self, ctx, args)
    }

    fn build_manifest(
        &self,
        ctx: &PipelineContext,
        lvgl_api: bool,
        displays: &[String],
        indevs: &[String],
        frozen_manifest: Option<&Path>,
    ) -> Result<PathBuf, ManifestError> {
        let request = ManifestRequest {
            lvgl_api,
            displays,
            indevs,
            frozen_manifest,
        };
        let merged = manifest::generate(&ctx.script_dir, &request)?;
        manifest::write(&ctx.manifest_path(), &merged)
    }

    fn compile(&self, commands: &CommandSet) -> Result<(), PortError> {
        self.check_fresh(commands)?;

        tracing::info!(
            "Compiling {} ({} commands, variant {})",
            self.config.port_name(),
            commands.len(),
            self.config.variant()
        );
        for command in &commands.commands {
            self.runner.run(command)?;
        }

        self.copy_firmware()?;
        Ok(())
    }

    fn mpy_cross(&self) -> Result<(), CompileError> {
        tracing::info!("Building mpy-cross");
        let command = BuildCommand::new("make")
            .arg("-C")
            .arg(self.config.mpy_cross_dir().display().to_string())
            .arg(format!("-j{}", self.config.jobs()));
        self.runner.run(&command)
    }

    fn clean(&self) -> Result<CleanResult, FilesystemError> {
        clean::clean_variant(&self.config)
    }

    fn force_clean(&self, clean_mpy_cross: bool) -> Result<CleanResult, FilesystemError> {
        clean::clean_all(&self.config, clean_mpy_cross)
    }

    fn submodules(&self) -> Result<(), CompileError> {
        let root = &self.config.paths().root;
        for path in self.submodule_paths() {
            if !filesystem::is_missing_or_empty(path) {
                tracing::debug!("Submodule {} present", path.display());
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            tracing::info!("Checking out submodule {}", relative.display());
            let command = BuildCommand::new("git")
                .args(["submodule", "update", "--init", "--depth", "1", "--"])
                .arg(relative.display().to_string())
                .current_dir(root)
                .env("GIT_TERMINAL_PROMPT", "0");
            self.runner.run(&command)?;
        }
        Ok(())
    }

    fn build_sdl(&self, addl_commands: &mut Vec<BuildCommand>) {
        let sdl_build = self.config.variant_build_dir().join(defaults::SDL_BUILD_SUBDIR);
        addl_commands.push(
            BuildCommand::new("cmake")
                .arg("-S")
                .arg(self.config.paths().sdl.display().to_string())
                .arg("-B")
                .arg(sdl_build.display().to_string())
                .args([
                    "-DCMAKE_BUILD_TYPE=Release",
                    "-DSDL_SHARED=ON",
                    "-DSDL_STATIC=OFF",
                ]),
        );
        addl_commands.push(
            BuildCommand::new("cmake")
                .arg("--build")
                .arg(sdl_build.display().to_string())
                .arg(format!("-j{}", self.config.jobs())),
        );
    }
}
