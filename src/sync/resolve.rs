//! Locate each skill's source directory across prioritised source roots.
use std::collections::HashSet;
use std::path::PathBuf;

use super::Skill;
use crate::logging::Log;

/// Find `name` in the first source root that has it as a directory.
///
/// Roots are searched in order, so an earlier root shadows later ones.
/// Symlinks to directories count as directories.
#[must_use]
pub fn resolve(name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.join(name))
        .find(|candidate| candidate.is_dir())
}

/// Resolve every name, in input order, dropping those that cannot be found.
///
/// Unresolved names are reported as warnings. A name listed twice is only
/// resolved once.
pub fn resolve_all(names: &[String], roots: &[PathBuf], log: &dyn Log) -> Vec<Skill> {
    let mut seen = HashSet::new();
    let mut skills = Vec::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match resolve(name, roots) {
            Some(source) => {
                log.debug(&format!("resolved {name}: {}", source.display()));
                skills.push(Skill {
                    name: name.clone(),
                    source,
                });
            }
            None => log.warn(&format!(
                "skill '{name}' not found in any source ({})",
                display_roots(roots)
            )),
        }
    }
    skills
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
