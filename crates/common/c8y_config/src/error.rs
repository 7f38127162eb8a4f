#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] figment::Error),

    #[error(transparent)]
    Multi(#[from] Multi),

    #[error("Home directory is not found.")]
    HomeDirNotFound,
}

impl ConfigError {
    pub fn multiple_errors(mut errors: Vec<Self>) -> Self {
        match errors.len() {
            1 => errors.remove(0),
            _ => Self::Multi(Multi(errors)),
        }
    }
}

/// Several configuration errors, reported one per line
#[derive(Debug)]
pub struct Multi(Vec<ConfigError>);

impl Multi {
    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }
}

impl std::fmt::Display for Multi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for Multi {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.first()?.source()
    }
}
