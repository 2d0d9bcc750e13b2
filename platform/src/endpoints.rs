//! Path builders for the rental API's REST surface.
//!
//! Paths are relative to [`ApiConfig::base_url`](crate::http::ApiConfig);
//! the adapter joins them verbatim.

/// Authentication and account endpoints.
pub mod auth {
    /// Create a pending account; the response carries a verification token.
    pub const SIGNUP: &str = "/auth/signup";
    /// Exchange credentials for an access/refresh pair and a user record.
    pub const SIGNIN: &str = "/auth/signin";
    /// Invalidate the server-side session.
    pub const LOGOUT: &str = "/auth/logout";
    /// Exchange a refresh token for a new token pair.
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
    /// Start password recovery for an email address.
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    /// Profile update (PATCH). The account area owns the flow; the path is
    /// mapped here so every consumer shares one URL scheme.
    pub const PROFILE: &str = "/auth";

    /// Confirm an email address with the 6-digit code sent to it.
    #[must_use]
    pub fn verify_code(token: &str) -> String {
        format!("/auth/verify-code/{token}")
    }

    /// Reissue the verification code for a pending account.
    #[must_use]
    pub fn resend_code(token: &str) -> String {
        format!("/auth/resend-code/{token}")
    }

    /// Finish password recovery with a new password.
    #[must_use]
    pub fn reset_password(token: &str) -> String {
        format!("/auth/reset-password/{token}")
    }
}

/// Fleet endpoints. Fleet management is owned by another team; the paths
/// are mapped here so every consumer shares one URL scheme.
pub mod car {
    /// Fleet collection root.
    pub const ROOT: &str = "/car";
    /// Aggregate fleet statistics.
    pub const STATS: &str = "/car/stats";

    /// Single car by id.
    #[must_use]
    pub fn detail(id: &str) -> String {
        format!("/car/{id}")
    }
}

/// Booking lifecycle endpoints.
pub mod booking {
    /// Booking collection root; POST creates, GET lists.
    pub const ROOT: &str = "/booking";

    /// Single booking by id.
    #[must_use]
    pub fn detail(id: &str) -> String {
        format!("/booking/{id}")
    }

    /// Bookings belonging to one user.
    #[must_use]
    pub fn by_user(user_id: &str) -> String {
        format!("/booking/user/{user_id}")
    }

    /// Cancel a booking; PATCH with a reason.
    #[must_use]
    pub fn cancel(id: &str) -> String {
        format!("/booking/cancel/{id}")
    }
}

/// Payment gateway endpoints.
pub mod payment {
    /// Obtain a gateway order descriptor for a booking.
    pub const CREATE_ORDER: &str = "/payment/create-order";
    /// Verify a gateway callback server-side.
    pub const VERIFY: &str = "/payment/verify";
}
