//! Build argument parsing
//!
//! Turns raw driver tokens into a validated [`BuildArgs`]. Tokens are either
//! make variables (`KEY=VALUE`), make flags (`-j8`, `--keep-going`) or make
//! targets (`all`). Parsing is pure: the same tokens and configuration
//! always give the same result.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::defaults::RESERVED_MAKE_VARS;
use crate::core::build_config::BuildConfig;
use crate::error::ArgumentError;

/// Validated build arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildArgs {
    /// Remaining make tokens, in the order given
    pub extra_args: Vec<String>,
    /// Normalised compiler flags for LVGL
    pub lv_cflags: String,
    /// Board identifier, if any
    pub board: Option<String>,
}

fn variable_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").expect("valid regex"))
}

fn normalise_flags(flags: &str) -> String {
    flags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse raw tokens against the active configuration
pub fn parse(
    config: &BuildConfig,
    extra_args: &[String],
    lv_cflags: &str,
    board: Option<&str>,
) -> Result<BuildArgs, ArgumentError> {
    let mut board = board
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from);
    let mut lv_cflags = normalise_flags(lv_cflags);
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut kept = Vec::with_capacity(extra_args.len());

    for (position, token) in extra_args.iter().enumerate() {
        if token.trim().is_empty() {
            return Err(ArgumentError::EmptyToken { position });
        }

        let Some((key, value)) = token.split_once('=').filter(|_| !token.starts_with('-')) else {
            kept.push(token.clone());
            continue;
        };

        if !variable_name().is_match(key) {
            return Err(ArgumentError::InvalidVariable {
                token: token.clone(),
            });
        }
        if RESERVED_MAKE_VARS.contains(&key) {
            return Err(ArgumentError::ReservedVariable {
                key: key.to_string(),
            });
        }
        if let Some(first) = seen.get(key) {
            if first != value {
                return Err(ArgumentError::ConflictingVariable {
                    key: key.to_string(),
                    first: first.clone(),
                    second: value.to_string(),
                });
            }
            continue;
        }
        seen.insert(key.to_string(), value.to_string());

        match key {
            "VARIANT" => {
                if value != config.variant() {
                    return Err(ArgumentError::VariantMismatch {
                        requested: value.to_string(),
                        configured: config.variant().to_string(),
                    });
                }
            }
            "BOARD" => match board {
                Some(ref b) if b != value => {
                    return Err(ArgumentError::BoardMismatch {
                        from_args: value.to_string(),
                        board: b.clone(),
                    });
                }
                Some(_) => {}
                None => board = Some(value.to_string()),
            },
            "LV_CFLAGS" => {
                lv_cflags = normalise_flags(&format!("{lv_cflags} {value}"));
            }
            _ => kept.push(token.clone()),
        }
    }

    Ok(BuildArgs {
        extra_args: kept,
        lv_cflags,
        board,
    })
}
