//! Client route vocabulary.
//!
//! A closed set of navigable destinations. Guards decide between them,
//! reducers hand them to the [`Navigator`](crate::navigation::Navigator)
//! port, and `path()` renders the canonical URL for each.

/// A navigable destination inside the client shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page with the featured fleet.
    Home,
    /// Sign-in form.
    SignIn,
    /// Account registration form.
    SignUp,
    /// Password reset form reached from a recovery email.
    ResetPassword {
        /// Recovery token from the email link.
        token: String,
    },
    /// Email verification code entry for a pending account.
    Verification {
        /// Verification token issued at sign-up.
        token: String,
    },
    /// Full fleet listing.
    Cars,
    /// Single car detail page.
    CarDetail {
        /// Car id.
        id: String,
    },
    /// Booking summary shown between creation and payment.
    BookingSummary {
        /// Booking id.
        id: String,
    },
    /// Post-payment confirmation page.
    PaymentSuccess,
    /// The signed-in user's booking list.
    MyBookings,
    /// Detail page for one of the user's bookings.
    BookingDetail {
        /// Booking id.
        id: String,
    },
    /// Account profile page.
    Profile,
    /// Static about page.
    About,
    /// Administrator dashboard.
    AdminDashboard,
    /// Agent delivery dashboard.
    AgentDashboard,
    /// Agent profile completion form.
    AgentProfile,
}

impl Route {
    /// Canonical URL path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::ResetPassword { token } => format!("/reset-password/{token}"),
            Self::Verification { token } => format!("/verification/{token}"),
            Self::Cars => "/cars".to_string(),
            Self::CarDetail { id } => format!("/car/{id}"),
            Self::BookingSummary { id } => format!("/booking/{id}"),
            Self::PaymentSuccess => "/payment-success".to_string(),
            Self::MyBookings => "/my-bookings".to_string(),
            Self::BookingDetail { id } => format!("/my-bookings/{id}"),
            Self::Profile => "/profile".to_string(),
            Self::About => "/about".to_string(),
            Self::AdminDashboard => "/admin".to_string(),
            Self::AgentDashboard => "/agent".to_string(),
            Self::AgentProfile => "/agent/profile".to_string(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::SignIn.path(), "/signin");
        assert_eq!(Route::MyBookings.path(), "/my-bookings");
        assert_eq!(Route::AdminDashboard.path(), "/admin");
        assert_eq!(Route::AgentProfile.path(), "/agent/profile");
    }

    #[test]
    fn test_parameterized_paths() {
        let verification = Route::Verification {
            token: "abc123".to_string(),
        };
        assert_eq!(verification.path(), "/verification/abc123");

        let summary = Route::BookingSummary {
            id: "b-42".to_string(),
        };
        assert_eq!(summary.path(), "/booking/b-42");

        let detail = Route::BookingDetail {
            id: "b-42".to_string(),
        };
        assert_eq!(detail.path(), "/my-bookings/b-42");
    }

    #[test]
    fn test_display_matches_path() {
        let route = Route::CarDetail {
            id: "c-7".to_string(),
        };
        assert_eq!(route.to_string(), route.path());
    }
}
