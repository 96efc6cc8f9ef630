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

//! AWS client factory glue for using Amazon S3 Tables with Apache Iceberg.
//!
//! This crate selects and applies AWS SDK configuration for the S3 Tables
//! control plane. Clients are built by a pluggable
//! [`S3TablesAwsClientFactory`], resolved by name from a property map. Two
//! factories are registered: `default`, which relies on the standard AWS
//! credential chain, and `assume-role`, which obtains temporary credentials
//! for a configured IAM role via STS.
//!
//! # Example
//!
//! ```rust, no_run
//! use std::collections::HashMap;
//!
//! use iceberg_s3tables_aws::{S3TABLES_ENDPOINT, S3TablesAwsClientFactory, client_factory_from};
//!
//! #[tokio::main]
//! async fn main() {
//!     let factory = client_factory_from(&HashMap::from([(
//!         S3TABLES_ENDPOINT.to_string(),
//!         "http://localhost:4566".to_string(),
//!     )]))
//!     .unwrap();
//!     let client = factory.s3tables().await.unwrap();
//! }
//! ```

#![deny(missing_docs)]

mod client_factory;
mod properties;
mod utils;

pub use client_factory::*;
pub use properties::*;
pub use utils::{
    AWS_ACCESS_KEY_ID, AWS_PROFILE_NAME, AWS_REGION_NAME, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN,
};
