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

use iceberg::{Error, ErrorKind, Result};
use url::Url;

/// Which client factory implementation to use for S3 Tables. The value must
/// be one of the names registered in
/// [`supported_factories`](crate::supported_factories). When unset,
/// the `default` factory is used.
pub const S3TABLES_CLIENT_FACTORY: &str = "s3tables.client-factory-impl";
/// Configure an alternative endpoint of the S3 Tables service to access.
pub const S3TABLES_ENDPOINT: &str = "s3tables.endpoint";

/// Parsed S3 Tables properties.
#[derive(Debug, Clone, Default)]
pub struct S3TablesProperties {
    endpoint: Option<String>,
}

impl S3TablesProperties {
    /// Parses S3 Tables properties out of a property map. Unrecognized keys
    /// are ignored; a malformed [`S3TABLES_ENDPOINT`] is rejected.
    pub fn new(properties: &HashMap<String, String>) -> Result<Self> {
        let endpoint = properties.get(S3TABLES_ENDPOINT).cloned();
        if let Some(endpoint) = &endpoint {
            Url::parse(endpoint).map_err(|e| {
                Error::new(
                    ErrorKind::DataInvalid,
                    format!("Invalid {S3TABLES_ENDPOINT}: {endpoint}"),
                )
                .with_source(e)
            })?;
        }

        Ok(Self { endpoint })
    }

    /// The configured S3 Tables endpoint override, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_absent() {
        let props = S3TablesProperties::new(&HashMap::new()).unwrap();
        assert_eq!(props.endpoint(), None);
    }

    #[test]
    fn test_endpoint_is_kept_verbatim() {
        let props = S3TablesProperties::new(&HashMap::from([(
            S3TABLES_ENDPOINT.to_string(),
            "http://localhost:4566".to_string(),
        )]))
        .unwrap();
        assert_eq!(props.endpoint(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_malformed_endpoint_is_rejected() {
        let err = S3TablesProperties::new(&HashMap::from([(
            S3TABLES_ENDPOINT.to_string(),
            "not a uri".to_string(),
        )]))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataInvalid);
        assert!(err.message().contains(S3TABLES_ENDPOINT));
    }
}
