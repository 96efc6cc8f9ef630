// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::sts::AssumeRoleProvider;
use aws_config::{Region, SdkConfig};
use iceberg::{Error, ErrorKind, Result};
use log::debug;
use uuid::Uuid;

use crate::properties::{S3TABLES_CLIENT_FACTORY, S3TablesProperties};
use crate::utils::create_sdk_config;

/// If set, the S3 Tables client will assume a role of the given ARN instead
/// of using the default credential chain.
pub const CLIENT_ASSUME_ROLE_ARN: &str = "client.assume-role.arn";
/// Region of the assumed role, applied to both the STS call and the
/// resulting S3 Tables client.
pub const CLIENT_ASSUME_ROLE_REGION: &str = "client.assume-role.region";
/// Optional external ID used to assume an IAM role.
pub const CLIENT_ASSUME_ROLE_EXTERNAL_ID: &str = "client.assume-role.external-id";
/// Optional session name used to assume an IAM role. When unset, a unique
/// per-process name is generated.
pub const CLIENT_ASSUME_ROLE_SESSION_NAME: &str = "client.assume-role.session-name";
/// Duration of the assumed-role session in seconds. Defaults to one hour.
pub const CLIENT_ASSUME_ROLE_TIMEOUT_SEC: &str = "client.assume-role.timeout-sec";

const ASSUME_ROLE_TIMEOUT_SEC_DEFAULT: u64 = 3600;

/// A factory constructing configured S3 Tables clients.
///
/// Factories are initialized once with the full property map and may be used
/// repeatedly afterwards.
#[async_trait]
pub trait S3TablesAwsClientFactory: Debug + Send + Sync {
    /// Consumes the property map this factory is configured with. Called
    /// exactly once, before any client is requested.
    fn initialize(&mut self, properties: &HashMap<String, String>) -> Result<()>;

    /// Builds a new S3 Tables client.
    async fn s3tables(&self) -> Result<aws_sdk_s3tables::Client>;
}

/// A constructor for a registered client factory.
type ClientFactoryConstructor = fn() -> Box<dyn S3TablesAwsClientFactory>;

/// A registry of client factories.
static CLIENT_FACTORY_REGISTRY: &[(&str, ClientFactoryConstructor)] = &[
    ("default", || {
        Box::new(DefaultS3TablesAwsClientFactory::default())
    }),
    ("assume-role", || {
        Box::new(S3TablesAssumeRoleClientFactory::default())
    }),
];

/// Return the list of supported client factory names.
pub fn supported_factories() -> Vec<&'static str> {
    CLIENT_FACTORY_REGISTRY.iter().map(|(k, _)| *k).collect()
}

/// Resolve a client factory by its registered name.
///
/// The returned factory is not yet initialized.
pub fn load_client_factory(name: &str) -> Result<Box<dyn S3TablesAwsClientFactory>> {
    let key = name.trim();
    if let Some((_, constructor)) = CLIENT_FACTORY_REGISTRY
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
    {
        Ok(constructor())
    } else {
        Err(Error::new(
            ErrorKind::FeatureUnsupported,
            format!(
                "Unsupported client factory: {}. Supported factories: {}",
                name,
                supported_factories().join(", ")
            ),
        ))
    }
}

/// Resolve, construct and initialize a client factory from a property map.
///
/// The factory name is read from
/// [`S3TABLES_CLIENT_FACTORY`](crate::S3TABLES_CLIENT_FACTORY) and defaults
/// to `default` when the key is absent.
pub fn client_factory_from(
    properties: &HashMap<String, String>,
) -> Result<Box<dyn S3TablesAwsClientFactory>> {
    let name = properties
        .get(S3TABLES_CLIENT_FACTORY)
        .map(String::as_str)
        .unwrap_or("default");
    let mut factory = load_client_factory(name)?;
    factory.initialize(properties)?;
    Ok(factory)
}

/// Builds S3 Tables clients using the default AWS credential chain.
#[derive(Debug, Default)]
pub struct DefaultS3TablesAwsClientFactory {
    s3tables_properties: S3TablesProperties,
    properties: HashMap<String, String>,
}

#[async_trait]
impl S3TablesAwsClientFactory for DefaultS3TablesAwsClientFactory {
    fn initialize(&mut self, properties: &HashMap<String, String>) -> Result<()> {
        self.s3tables_properties = S3TablesProperties::new(properties)?;
        self.properties = properties.clone();
        Ok(())
    }

    async fn s3tables(&self) -> Result<aws_sdk_s3tables::Client> {
        let sdk_config =
            create_sdk_config(&self.properties, self.s3tables_properties.endpoint()).await;
        debug!("Creating S3 Tables client from the default credential chain");
        Ok(aws_sdk_s3tables::Client::new(&sdk_config))
    }
}

/// Builds S3 Tables clients backed by temporary credentials for an assumed
/// IAM role.
///
/// Requires [`CLIENT_ASSUME_ROLE_ARN`] and [`CLIENT_ASSUME_ROLE_REGION`] to
/// be set. Credential refresh is handled by the SDK's [`AssumeRoleProvider`].
#[derive(Debug, Default)]
pub struct S3TablesAssumeRoleClientFactory {
    s3tables_properties: S3TablesProperties,
    properties: HashMap<String, String>,
    role_arn: String,
    role_region: String,
    external_id: Option<String>,
    session_name: String,
    session_length: Duration,
}

impl S3TablesAssumeRoleClientFactory {
    /// The session name used for assumed-role sessions. Sessions show up
    /// under this name in CloudTrail, so callers may want to log it.
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    fn gen_session_name() -> String {
        format!("s3tables-aws-{}", Uuid::new_v4())
    }

    /// Configuration for the STS client performing the assume-role calls.
    ///
    /// The S3 Tables endpoint override must not leak into it; STS keeps its
    /// default endpoint.
    async fn sts_config(&self) -> SdkConfig {
        create_sdk_config(&self.properties, None).await
    }
}

#[async_trait]
impl S3TablesAwsClientFactory for S3TablesAssumeRoleClientFactory {
    fn initialize(&mut self, properties: &HashMap<String, String>) -> Result<()> {
        self.s3tables_properties = S3TablesProperties::new(properties)?;
        self.role_arn = properties
            .get(CLIENT_ASSUME_ROLE_ARN)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::DataInvalid,
                    format!(
                        "Cannot initialize S3TablesAssumeRoleClientFactory, missing {CLIENT_ASSUME_ROLE_ARN}"
                    ),
                )
            })?;
        self.role_region = properties
            .get(CLIENT_ASSUME_ROLE_REGION)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::DataInvalid,
                    format!(
                        "Cannot initialize S3TablesAssumeRoleClientFactory, missing {CLIENT_ASSUME_ROLE_REGION}"
                    ),
                )
            })?;
        self.external_id = properties
            .get(CLIENT_ASSUME_ROLE_EXTERNAL_ID)
            .filter(|v| !v.is_empty())
            .cloned();
        self.session_name = properties
            .get(CLIENT_ASSUME_ROLE_SESSION_NAME)
            .cloned()
            .unwrap_or_else(Self::gen_session_name);

        let timeout_sec = match properties.get(CLIENT_ASSUME_ROLE_TIMEOUT_SEC) {
            Some(timeout) => timeout.parse::<u64>().map_err(|e| {
                Error::new(
                    ErrorKind::DataInvalid,
                    format!("Invalid {CLIENT_ASSUME_ROLE_TIMEOUT_SEC}: {timeout}"),
                )
                .with_source(e)
            })?,
            None => ASSUME_ROLE_TIMEOUT_SEC_DEFAULT,
        };
        self.session_length = Duration::from_secs(timeout_sec);

        self.properties = properties.clone();
        Ok(())
    }

    async fn s3tables(&self) -> Result<aws_sdk_s3tables::Client> {
        let region = Region::new(self.role_region.clone());
        let mut provider = AssumeRoleProvider::builder(self.role_arn.clone())
            .session_name(self.session_name.clone())
            .session_length(self.session_length)
            .region(region.clone())
            .configure(&self.sts_config().await);
        if let Some(external_id) = &self.external_id {
            provider = provider.external_id(external_id.clone());
        }
        let provider = provider.build().await;

        debug!(
            "Creating S3 Tables client assuming role {} in {}",
            self.role_arn, self.role_region
        );
        let sdk_config =
            create_sdk_config(&self.properties, self.s3tables_properties.endpoint()).await;
        let config = aws_sdk_s3tables::config::Builder::from(&sdk_config)
            .credentials_provider(provider)
            .region(region)
            .build();
        Ok(aws_sdk_s3tables::Client::from_conf(config))
    }
}
