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

use aws_config::{AppName, BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3tables::config::Credentials;

/// Property aws profile name
pub const AWS_PROFILE_NAME: &str = "profile_name";
/// Property aws region
pub const AWS_REGION_NAME: &str = "region_name";
/// Property aws access key
pub const AWS_ACCESS_KEY_ID: &str = "aws_access_key_id";
/// Property aws secret access key
pub const AWS_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
/// Property aws session token
pub const AWS_SESSION_TOKEN: &str = "aws_session_token";

/// Reported to AWS as the calling application.
const APP_NAME: &str = "iceberg-s3tables-aws";

/// Creates an aws sdk configuration based on
/// provided properties and an optional endpoint URL.
pub(crate) async fn create_sdk_config(
    properties: &HashMap<String, String>,
    endpoint_url: Option<&str>,
) -> SdkConfig {
    let mut config = aws_config::defaults(BehaviorVersion::latest());

    if let Ok(app_name) = AppName::new(APP_NAME) {
        config = config.app_name(app_name);
    }

    if let Some(endpoint_url) = endpoint_url {
        config = config.endpoint_url(endpoint_url);
    }

    if let (Some(access_key), Some(secret_key)) = (
        properties.get(AWS_ACCESS_KEY_ID),
        properties.get(AWS_SECRET_ACCESS_KEY),
    ) {
        let session_token = properties.get(AWS_SESSION_TOKEN).cloned();
        let credentials_provider =
            Credentials::new(access_key, secret_key, session_token, None, "properties");

        config = config.credentials_provider(credentials_provider)
    };

    if let Some(profile_name) = properties.get(AWS_PROFILE_NAME) {
        config = config.profile_name(profile_name);
    }

    if let Some(region_name) = properties.get(AWS_REGION_NAME) {
        let region = Region::new(region_name.clone());
        config = config.region(region);
    }

    config.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_properties() -> HashMap<String, String> {
        HashMap::from([
            (AWS_REGION_NAME.to_string(), "us-east-1".to_string()),
            (AWS_ACCESS_KEY_ID.to_string(), "my_access_id".to_string()),
            (
                AWS_SECRET_ACCESS_KEY.to_string(),
                "my_secret_key".to_string(),
            ),
        ])
    }

    #[tokio::test]
    async fn test_config_applies_endpoint_verbatim() {
        let sdk_config =
            create_sdk_config(&test_properties(), Some("http://localhost:4566")).await;
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:4566"));
    }

    #[tokio::test]
    async fn test_config_without_endpoint_leaves_it_unset() {
        let sdk_config = create_sdk_config(&test_properties(), None).await;
        assert_eq!(sdk_config.endpoint_url(), None);
    }

    #[tokio::test]
    async fn test_config_applies_region() {
        let sdk_config = create_sdk_config(&test_properties(), None).await;
        assert_eq!(sdk_config.region(), Some(&Region::new("us-east-1")));
    }
}
