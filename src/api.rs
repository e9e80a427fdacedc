use crate::{
    checks::{check::*, credentials::*},
    client::HostClient,
    config::Config,
    configuration::MISSING_CREDENTIALS_MESSAGE,
    mappers::{details::extract_details, normalizer::*},
    products::{details::CheckDetails, normalized::Normalized, result::CheckResult},
    *,
};
use std::sync::Arc;


/**
    Public library API for Hostmaster checks functionality
 **/


/// Entry point for UI collaborators: submits checks and polls jobs with whatever
/// credentials are currently stored.
#[derive(Debug, Clone)]
pub struct CheckService {
    client: Arc<HostClient>,
    credentials: CredentialStore,
    options: NormalizerOptions,
}


impl CheckService {
    /// New service from configuration, sharing given credential store
    pub fn new(config: &Config, credentials: CredentialStore) -> CheckService {
        CheckService {
            client: Arc::new(HostClient::new(config)),
            credentials,
            options: config.normalizer_options(),
        }
    }


    /// New service over an existing client
    pub fn with_client(client: Arc<HostClient>, credentials: CredentialStore) -> CheckService {
        CheckService {
            client,
            credentials,
            options: NormalizerOptions::default(),
        }
    }


    /// Replace normalizer options
    pub fn with_options(self, options: NormalizerOptions) -> CheckService {
        CheckService { options, ..self }
    }


    /// Underlying client
    pub fn client(&self) -> &HostClient {
        &self.client
    }


    /// Submit check using stored credentials
    pub fn submit_check(&self, request: &CheckRequest) -> CheckResult {
        match self.credentials.current() {
            Some(credentials) => self.client.submit(&credentials, request),
            None => {
                warn!("Check {} not submitted: no credentials", request.check_type());
                CheckResult::failure(MISSING_CREDENTIALS_MESSAGE)
            }
        }
    }


    /// Fetch job using stored credentials
    pub fn fetch_job(&self, job_id: &str) -> CheckResult {
        match self.credentials.current() {
            Some(credentials) => self.client.fetch_job(&credentials, job_id),
            None => {
                warn!("Job {} not fetched: no credentials", job_id);
                CheckResult::failure(MISSING_CREDENTIALS_MESSAGE)
            }
        }
    }


    /// Normalized view of result body
    pub fn normalize(&self, result: &CheckResult) -> Normalized {
        result.normalized(&self.options)
    }


    /// Typed details of result body for given check type
    pub fn details(&self, check_type: CheckType, result: &CheckResult) -> Option<CheckDetails> {
        extract_details(check_type, result.body.as_deref())
    }
}
