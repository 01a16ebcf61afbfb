//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockHashJobsCommand, MockHashJobsQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked driving ports; set expectations before calling [`MockPorts::app`].
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub hash_jobs: MockHashJobsCommand,
    pub hash_jobs_query: MockHashJobsQuery,
}

impl MockPorts {
    /// Build an app serving the `/api/v1` scope over the mocked ports.
    ///
    /// Unconfigured mocks panic when called, so a test fails loudly if a
    /// handler reaches a port it should not.
    pub fn app(
        self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(HttpStatePorts {
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            hash_jobs: Arc::new(self.hash_jobs),
            hash_jobs_query: Arc::new(self.hash_jobs_query),
        });
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope())
    }
}
