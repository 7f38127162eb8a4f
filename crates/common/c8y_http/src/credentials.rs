use reqwest::RequestBuilder;
use std::fmt;

/// Credentials used to authenticate requests to Cumulocity
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Basic authentication
    ///
    /// When a tenant is given the user name is sent as `<tenant>/<user>`.
    Basic {
        tenant: Option<String>,
        user: String,
        password: String,
    },

    /// A bearer token, e.g. a JWT issued by the platform
    Bearer(String),
}

impl Credentials {
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            tenant: None,
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn tenant_user(
        tenant: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Credentials::Basic {
            tenant: Some(tenant.into()),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    /// The user name as sent over the wire
    pub fn username(&self) -> Option<String> {
        match self {
            Credentials::Basic {
                tenant: Some(tenant),
                user,
                ..
            } => Some(format!("{tenant}/{user}")),
            Credentials::Basic { user, .. } => Some(user.clone()),
            Credentials::Bearer(_) => None,
        }
    }

    pub(crate) fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Basic { password, .. } => {
                request.basic_auth(self.username().unwrap_or_default(), Some(password))
            }
            Credentials::Bearer(token) => request.bearer_auth(token),
        }
    }
}

// Never print secrets
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { .. } => f
                .debug_struct("Basic")
                .field("user", &self.username())
                .field("password", &"******")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"******").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_is_prepended_to_the_user_name() {
        let credentials = Credentials::tenant_user("t12345", "servicebootstrap_app", "secret");
        assert_eq!(
            credentials.username().as_deref(),
            Some("t12345/servicebootstrap_app")
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let basic = format!("{:?}", Credentials::basic("admin", "secret"));
        let bearer = format!("{:?}", Credentials::bearer("eyJhbGciOi"));

        assert!(!basic.contains("secret"));
        assert!(basic.contains("admin"));
        assert!(!bearer.contains("eyJhbGciOi"));
    }
}
