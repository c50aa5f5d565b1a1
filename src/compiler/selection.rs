use super::{
    pragma::{self, PragmaError, VersionPragma},
    CompilerVersion, SolcCompiler, SolidityConfig, VyperCompiler, VyperConfig,
};
use std::{
    fmt::{Display, Formatter},
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Solidity,
    Vyper,
}

impl Language {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "sol" => Some(Self::Solidity),
            "vy" => Some(Self::Vyper),
            _ => None,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Solidity => f.write_str("solidity"),
            Language::Vyper => f.write_str("vyper"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("'{0}' is neither a solidity nor a vyper source")]
    UnknownLanguage(PathBuf),
    #[error("'{path}' declares an invalid pragma: {source}")]
    Pragma {
        path: PathBuf,
        #[source]
        source: PragmaError,
    },
    #[error("no declared {language} compiler satisfies '{requirement}' required by '{path}'")]
    NoMatchingCompiler {
        path: PathBuf,
        language: Language,
        requirement: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedCompiler<'a> {
    Solidity(&'a SolcCompiler),
    Vyper(&'a VyperCompiler),
}

impl<'a> SelectedCompiler<'a> {
    pub fn language(&self) -> Language {
        match self {
            SelectedCompiler::Solidity(_) => Language::Solidity,
            SelectedCompiler::Vyper(_) => Language::Vyper,
        }
    }

    pub fn version(&self) -> &'a CompilerVersion {
        match *self {
            SelectedCompiler::Solidity(compiler) => &compiler.version,
            SelectedCompiler::Vyper(compiler) => &compiler.version,
        }
    }
}

impl Display for SelectedCompiler<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.language(), self.version())
    }
}

/// Picks the compiler for a source file.
///
/// `source_path` is relative to the project root; it is matched against the
/// solidity overrides before any pragma is looked at. Otherwise the highest
/// declared version satisfying every pragma of the file wins, so the order
/// compilers are declared in never matters.
pub fn select_compiler<'a>(
    solidity: &'a SolidityConfig,
    vyper: &'a VyperConfig,
    source_path: &Path,
    content: &str,
) -> Result<SelectedCompiler<'a>, SelectionError> {
    let language = Language::from_path(source_path)
        .ok_or_else(|| SelectionError::UnknownLanguage(source_path.to_path_buf()))?;
    let pragma_error = |source| SelectionError::Pragma {
        path: source_path.to_path_buf(),
        source,
    };

    let selected = match language {
        Language::Solidity => {
            if let Some(compiler) = solidity.override_for(&override_key(source_path)) {
                log::debug!("'{}' uses overridden compiler", source_path.display());
                return Ok(SelectedCompiler::Solidity(compiler));
            }
            let pragmas = pragma::solidity_pragmas(content).map_err(pragma_error)?;
            highest_satisfying(&solidity.compilers, |c| &c.version, &pragmas)
                .map(SelectedCompiler::Solidity)
                .ok_or_else(|| no_match(source_path, language, &pragmas))?
        }
        Language::Vyper => {
            let pragmas: Vec<_> = pragma::vyper_pragma(content)
                .map_err(pragma_error)?
                .into_iter()
                .collect();
            highest_satisfying(&vyper.compilers, |c| &c.version, &pragmas)
                .map(SelectedCompiler::Vyper)
                .ok_or_else(|| no_match(source_path, language, &pragmas))?
        }
    };
    log::debug!("'{}' compiles with {}", source_path.display(), selected);
    Ok(selected)
}

fn highest_satisfying<'a, T>(
    compilers: &'a [T],
    version: impl Fn(&T) -> &CompilerVersion,
    pragmas: &[VersionPragma],
) -> Option<&'a T> {
    compilers
        .iter()
        .filter(|compiler| {
            pragmas
                .iter()
                .all(|pragma| pragma.matches(version(*compiler).to_semver()))
        })
        .max_by(|a, b| version(*a).cmp(version(*b)))
}

fn no_match(path: &Path, language: Language, pragmas: &[VersionPragma]) -> SelectionError {
    let requirement = if pragmas.is_empty() {
        "*".to_string()
    } else {
        pragmas
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ")
    };
    SelectionError::NoMatchingCompiler {
        path: path.to_path_buf(),
        language,
        requirement,
    }
}

/// Overrides are keyed by `/`-separated paths without leading `./`.
fn override_key(path: &Path) -> String {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SolcSettings;
    use pretty_assertions::assert_eq;
    use std::{collections::BTreeMap, str::FromStr};

    fn version(s: &str) -> CompilerVersion {
        CompilerVersion::from_str(s).unwrap()
    }

    fn solidity(versions: &[&str]) -> SolidityConfig {
        SolidityConfig {
            compilers: versions
                .iter()
                .map(|v| SolcCompiler::new(version(v), SolcSettings::default()))
                .collect(),
            overrides: BTreeMap::new(),
        }
    }

    fn vyper(versions: &[&str]) -> VyperConfig {
        VyperConfig {
            compilers: versions
                .iter()
                .map(|v| VyperCompiler::new(version(v)))
                .collect(),
        }
    }

    fn select(
        solidity: &SolidityConfig,
        vyper: &VyperConfig,
        path: &str,
        content: &str,
    ) -> Result<String, SelectionError> {
        select_compiler(solidity, vyper, Path::new(path), content).map(|c| c.to_string())
    }

    #[test]
    fn picks_highest_matching_solidity() {
        let solidity = solidity(&["0.8.11", "0.6.12", "0.8.4"]);
        let vyper = vyper(&[]);
        let selected = select(&solidity, &vyper, "A.sol", "pragma solidity ^0.8.0;").unwrap();
        assert_eq!(selected, "solidity 0.8.11");
        let selected = select(&solidity, &vyper, "B.sol", "pragma solidity ^0.6.0;").unwrap();
        assert_eq!(selected, "solidity 0.6.12");
        let selected = select(&solidity, &vyper, "C.sol", "contract C {}").unwrap();
        assert_eq!(selected, "solidity 0.8.11");
    }

    #[test]
    fn compact_pragmas_constrain_selection() {
        let solidity = solidity(&["0.6.12", "0.8.11"]);
        let vyper = vyper(&[]);
        for source in ["pragma solidity^0.6.0;", "pragma solidity >=0.6.0<0.7.0;"] {
            let selected = select(&solidity, &vyper, "A.sol", source).unwrap();
            assert_eq!(selected, "solidity 0.6.12", "source: {source}");
        }
    }

    #[test]
    fn order_of_declaration_does_not_matter() {
        let vyper_config = vyper(&[]);
        let source = "pragma solidity >=0.6.0 <0.8.0;";
        let forward = solidity(&["0.6.12", "0.8.11"]);
        let backward = solidity(&["0.8.11", "0.6.12"]);
        assert_eq!(
            select(&forward, &vyper_config, "A.sol", source).unwrap(),
            select(&backward, &vyper_config, "A.sol", source).unwrap(),
        );
    }

    #[test]
    fn every_pragma_must_hold() {
        let solidity = solidity(&["0.6.12", "0.7.6", "0.8.11"]);
        let source = "pragma solidity >=0.6.0;\npragma solidity <0.8.0;";
        let selected = select(&solidity, &vyper(&[]), "A.sol", source).unwrap();
        assert_eq!(selected, "solidity 0.7.6");
    }

    #[test]
    fn override_wins_over_pragma() {
        let mut solidity = solidity(&["0.8.11"]);
        solidity.overrides.insert(
            "contracts/Legacy.sol".into(),
            SolcCompiler::new(version("0.5.17"), SolcSettings::default()),
        );
        let vyper = vyper(&[]);
        for path in ["contracts/Legacy.sol", "./contracts/Legacy.sol"] {
            let selected = select(&solidity, &vyper, path, "pragma solidity ^0.8.0;").unwrap();
            assert_eq!(selected, "solidity 0.5.17");
        }
    }

    #[test]
    fn picks_vyper_by_version_comment() {
        let solidity = solidity(&[]);
        let vyper = vyper(&["0.3.3", "0.3.1", "0.2.4", "0.2.7", "0.2.12"]);
        let selected = select(&solidity, &vyper, "Vault.vy", "# @version 0.2.7\n").unwrap();
        assert_eq!(selected, "vyper 0.2.7");
        let selected = select(&solidity, &vyper, "Vault.vy", "# @version ^0.2.0\n").unwrap();
        assert_eq!(selected, "vyper 0.2.12");
        let selected = select(&solidity, &vyper, "Vault.vy", "@external\n").unwrap();
        assert_eq!(selected, "vyper 0.3.3");
    }

    #[test]
    fn no_matching_compiler() {
        let solidity = solidity(&["0.6.12", "0.8.11"]);
        let err = select(&solidity, &vyper(&[]), "A.sol", "pragma solidity 0.7.6;").unwrap_err();
        match err {
            SelectionError::NoMatchingCompiler {
                language,
                requirement,
                ..
            } => {
                assert_eq!(language, Language::Solidity);
                assert_eq!(requirement, "0.7.6");
            }
            _ => panic!("Invalid selection error: {:?}", err),
        }
    }

    #[test]
    fn unknown_extension() {
        let err = select(&solidity(&["0.8.11"]), &vyper(&[]), "README.md", "").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownLanguage(_)));
    }

    #[test]
    fn invalid_pragma() {
        let err = select(
            &solidity(&["0.8.11"]),
            &vyper(&[]),
            "A.sol",
            "pragma solidity latest;",
        )
        .unwrap_err();
        assert!(matches!(err, SelectionError::Pragma { .. }));
    }
}
