//! Storefront session state
//!
//! One [`Session`] holds what the storefront remembers between actions:
//! the current view, the signed-in user, the product being inspected and
//! the cart. Navigation goes through [`Session::navigate`], which applies
//! the access guards before switching views.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{Currency, InsuranceId};
use domain_cart::Cart;
use domain_user::User;

/// Screens of the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Home,
    Login,
    Register,
    Dashboard,
    Detail,
    Cart,
    Checkout,
    ForgotPassword,
    Admin,
    Privacy,
    Terms,
    Cookies,
}

impl View {
    /// True for views that need a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(self, View::Dashboard | View::Admin)
    }

    /// True for views only administrators may open
    pub fn requires_admin(&self) -> bool {
        matches!(self, View::Admin)
    }

    /// The sign-in screens render without the footer
    pub fn shows_footer(&self) -> bool {
        !matches!(self, View::Login | View::Register | View::ForgotPassword)
    }
}

/// Where a request to open `requested` actually lands
///
/// Anonymous visitors are sent to Login for guarded views; signed-in
/// users without the administrator role are sent Home from Admin.
pub fn guard(requested: View, user: Option<&User>) -> View {
    match user {
        None if requested.requires_session() => View::Login,
        Some(user) if requested.requires_admin() && !user.is_admin() => View::Home,
        _ => requested,
    }
}

/// State of one storefront session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    view: View,
    user: Option<User>,
    selected_insurance: Option<InsuranceId>,
    cart: Cart,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

impl Session {
    /// Creates an anonymous session on the home page
    pub fn new(currency: Currency) -> Self {
        Self {
            view: View::Home,
            user: None,
            selected_insurance: None,
            cart: Cart::new(currency),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn selected_insurance(&self) -> Option<&InsuranceId> {
        self.selected_insurance.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Whether the current view renders the footer
    pub fn shows_footer(&self) -> bool {
        self.view.shows_footer()
    }

    /// Opens `requested`, or wherever the guard redirects; returns the view shown
    ///
    /// Detail without a selected product falls back to Home.
    pub fn navigate(&mut self, requested: View) -> View {
        let mut target = guard(requested, self.user.as_ref());
        if target == View::Detail && self.selected_insurance.is_none() {
            target = View::Home;
        }
        if target != requested {
            debug!(?requested, ?target, "Navigation redirected");
        }
        self.view = target;
        target
    }

    /// Stores the signed-in user and opens the dashboard
    pub fn sign_in(&mut self, user: User) {
        info!(user_id = %user.id, "Session started");
        self.user = Some(user);
        self.view = View::Dashboard;
    }

    /// Forgets the user, empties the cart and returns home
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Session ended");
        }
        self.cart.clear();
        self.view = View::Home;
    }

    /// Selects a product and opens its detail page
    pub fn view_insurance(&mut self, id: InsuranceId) {
        self.selected_insurance = Some(id);
        self.view = View::Detail;
    }

    /// Empties the cart after a successful checkout and opens the dashboard
    pub fn complete_checkout(&mut self) {
        self.cart.clear();
        self.navigate(View::Dashboard);
    }
}
