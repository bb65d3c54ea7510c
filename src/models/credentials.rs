//! 登录凭据
//!
//! 只在一次批量提交期间存在，不落盘、不写日志

use std::fmt;

/// LMS 登录凭据
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub lms_base_url: String,
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        lms_base_url: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            lms_base_url: lms_base_url.into(),
        }
    }
}

// 密码不能出现在 {:?} 输出里
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .field("lms_base_url", &self.lms_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("staff@example.com", "s3cret!", "https://lms.example.com");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("staff@example.com"));
        assert!(!printed.contains("s3cret!"));
    }
}
