//! User identity fields compared against candidate passwords.

/// Account information a password must not be based on, as found in
/// `/etc/passwd`: the login name, the gecos comment field, and the home
/// directory. Each field is compared independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentity {
    name: String,
    gecos: String,
    home_directory: String,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        UserIdentity {
            name: name.into(),
            gecos: String::new(),
            home_directory: String::new(),
        }
    }

    pub fn with_gecos(mut self, gecos: impl Into<String>) -> Self {
        self.gecos = gecos.into();
        self
    }

    pub fn with_home_directory(mut self, home_directory: impl Into<String>) -> Self {
        self.home_directory = home_directory.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gecos(&self) -> &str {
        &self.gecos
    }

    pub fn home_directory(&self) -> &str {
        &self.home_directory
    }
}
