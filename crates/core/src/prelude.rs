//! Orchid prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{
        AuthService, AuthServiceError, AuthStatus, DemoAccount, Identity, LoginError, LoginForm,
        LoginValidationError,
    },
    cart::{CartStore, LineItem},
    catalog::{
        Catalog, CatalogError, Course, CourseId, CoursePrice, PriceError,
        fixtures::{demo_catalog, load_catalog, load_catalog_file},
    },
    checkout::{
        AuthCompletion, CheckoutAttempt, CheckoutCoordinator, CheckoutError, CheckoutRejection,
        CheckoutState, GatewayError, PendingCheckoutHandoff, PurchaseConfirmation,
        PurchaseGateway, PurchaseRequest, SimulatedGateway,
    },
    learning::{CourseStatus, LearningHistory, LearningStats, LearningTab, PurchasedCourse},
    navigation::{Location, MemoryNavigator, Navigator, RouteDecision, guard_route},
    receipt::{ReceiptError, write_cart, write_catalog, write_learning},
    session::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError},
    storefront::{CheckoutOutcome, Storefront, StorefrontConfig, StorefrontError, Visit},
};
