// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Google credentials for the Sheets API.
//!
//! Two flows are supported: a service account key (the default, read from the
//! gspread configuration directory) and the OAuth2 installed-application flow
//! with tokens persisted to disk.

use anyhow::{Context, Result};
use google_sheets4::{
    hyper_rustls,
    yup_oauth2::{
        self, ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
        ServiceAccountAuthenticator, authenticator::Authenticator,
    },
};
use hyper_util::client::legacy::connect::HttpConnector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Scopes required to read the planning sheet and write the overview
const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const SERVICE_ACCOUNT_FILE: &str = "service_account.json";
const TOKEN_CACHE_FILE: &str = "authorized_user.json";

/// Google Cloud Console client secret file format
#[derive(Debug, Serialize, Deserialize)]
struct GoogleClientSecretFile {
    installed: ApplicationSecret,
}

/// Credential file locations as given in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CredentialsConfig {
    pub service_account_file: Option<PathBuf>,
    pub client_secret_file: Option<PathBuf>,
    pub token_cache_file: Option<PathBuf>,
}

/// Which authentication flow to run, with all paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    ServiceAccount {
        key_path: PathBuf,
    },
    InstalledFlow {
        client_secret_path: PathBuf,
        token_cache_path: PathBuf,
    },
}

impl CredentialSource {
    /// Resolves the configured credentials against the default directory.
    ///
    /// A configured client secret selects the installed flow; otherwise the
    /// service account key is used.
    pub fn resolve(config: &CredentialsConfig, default_dir: &Path) -> Self {
        match &config.client_secret_file {
            Some(client_secret_path) => CredentialSource::InstalledFlow {
                client_secret_path: client_secret_path.clone(),
                token_cache_path: config
                    .token_cache_file
                    .clone()
                    .unwrap_or_else(|| default_dir.join(TOKEN_CACHE_FILE)),
            },
            None => CredentialSource::ServiceAccount {
                key_path: config
                    .service_account_file
                    .clone()
                    .unwrap_or_else(|| default_dir.join(SERVICE_ACCOUNT_FILE)),
            },
        }
    }
}

/// Builds authenticators for the Sheets API hub.
pub struct AuthManager {
    source: CredentialSource,
}

impl AuthManager {
    pub fn new(source: CredentialSource) -> Self {
        Self { source }
    }

    /// Creates an authenticator and checks that it can obtain a token.
    ///
    /// # Errors
    ///
    /// * If the credential files are missing, empty or malformed
    /// * If no access token can be obtained for the required scopes
    pub async fn authenticator(
        &self,
    ) -> Result<Authenticator<hyper_rustls::HttpsConnector<HttpConnector>>> {
        let auth = match &self.source {
            CredentialSource::ServiceAccount { key_path } => {
                Self::validate_credential_file(key_path)?;
                info!("🔐 Using service account key at: {}", key_path.display());

                let key = yup_oauth2::read_service_account_key(key_path)
                    .await
                    .with_context(|| {
                        format!("Failed to read service account key from {:?}", key_path)
                    })?;

                ServiceAccountAuthenticator::builder(key)
                    .build()
                    .await
                    .context("Failed to build service account authenticator")?
            }
            CredentialSource::InstalledFlow {
                client_secret_path,
                token_cache_path,
            } => {
                let client_secret = Self::load_client_secret(client_secret_path)?;
                info!(
                    "🔐 Using OAuth2 tokens cached at: {}",
                    token_cache_path.display()
                );

                InstalledFlowAuthenticator::builder(
                    client_secret,
                    InstalledFlowReturnMethod::HTTPRedirect,
                )
                .persist_tokens_to_disk(token_cache_path.clone())
                .build()
                .await
                .context("Failed to build OAuth2 authenticator")?
            }
        };

        debug!("🔍 Requesting token for scopes: {:?}", SCOPES);
        auth.token(SCOPES)
            .await
            .context("Failed to obtain access token for Google Sheets")?;

        Ok(auth)
    }

    /// Loads an OAuth2 client secret, with or without the `installed` wrapper.
    pub fn load_client_secret(secret_path: &Path) -> Result<ApplicationSecret> {
        Self::validate_credential_file(secret_path)?;

        let secret_json = fs::read_to_string(secret_path)
            .with_context(|| format!("Failed to read client secret from {:?}", secret_path))?;

        if let Ok(google_format) = serde_json::from_str::<GoogleClientSecretFile>(&secret_json) {
            return Ok(google_format.installed);
        }

        let secret: ApplicationSecret = serde_json::from_str(&secret_json).with_context(|| {
            format!(
                "Failed to parse client secret JSON from {:?}. Expected the file downloaded from Google Cloud Console.",
                secret_path
            )
        })?;

        Ok(secret)
    }

    fn validate_credential_file(path: &Path) -> Result<()> {
        if !path.exists() {
            anyhow::bail!("Credential file not found: {:?}", path);
        }

        if !path.is_file() {
            anyhow::bail!("Credential path is not a file: {:?}", path);
        }

        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read credential metadata: {:?}", path))?;

        if metadata.len() == 0 {
            anyhow::bail!("Credential file is empty: {:?}", path);
        }

        Ok(())
    }
}
