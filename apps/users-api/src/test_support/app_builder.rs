//! Test service builder.
//! Given an AppState, build an initialized Actix **test service** through
//! [`build_app`], so tests run behind the same middleware stack as the server.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::{self, ServiceConfig};
use actix_web::Error as ActixError;

use crate::app::build_app;
use crate::state::app_state::AppState;

/// Function pointer for custom route configuration.
type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig) + Send>;

pub fn create_test_app_builder(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        router: Router::Prod,
        cors_allowed_origins: Vec::new(),
    }
}

enum Router {
    Prod,
    Custom(RoutesFn),
}

pub struct TestAppBuilder {
    state: AppState,
    router: Router,
    cors_allowed_origins: Vec<String>,
}

impl TestAppBuilder {
    /// Use the application's production routes (the default).
    pub fn with_prod_routes(mut self) -> Self {
        self.router = Router::Prod;
        self
    }

    /// Use custom routes for a test.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + Send + 'static,
    {
        self.router = Router::Custom(Box::new(f));
        self
    }

    /// Allowed CORS origins; empty means the localhost defaults.
    pub fn with_cors_origins<I, O>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        self.cors_allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Build and initialize the Actix test service.
    pub async fn build(
        self,
    ) -> impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = ActixError,
    > {
        let routes: RoutesFn = match self.router {
            Router::Prod => Box::new(crate::routes::configure),
            Router::Custom(f) => f,
        };

        let app = build_app(
            web::Data::new(self.state),
            &self.cors_allowed_origins,
            routes,
        );

        actix_web::test::init_service(app).await
    }
}
