//! Stable identifiers for built-in rules.
//!
//! Current ids are `provider-service-short-name`. Legacy ids are the
//! superseded short codes, still accepted by filters and ignore directives.

// aws
pub const AWS_KINESIS_ENABLE_IN_TRANSIT_ENCRYPTION: &str = "aws-kinesis-enable-in-transit-encryption";
pub const LEGACY_AWS_KINESIS_ENABLE_IN_TRANSIT_ENCRYPTION: &str = "AWS024";
pub const AWS_API_GATEWAY_ENABLE_TRACING: &str = "aws-api-gateway-enable-tracing";

// azure
pub const AZURE_STORAGE_DEFAULT_ACTION_DENY: &str = "azure-storage-default-action-deny";
pub const LEGACY_AZURE_STORAGE_DEFAULT_ACTION_DENY: &str = "AZU012";
pub const AZURE_KEYVAULT_SPECIFY_NETWORK_ACL: &str = "azure-keyvault-specify-network-acl";
pub const LEGACY_AZURE_KEYVAULT_SPECIFY_NETWORK_ACL: &str = "AZU020";
pub const AZURE_DATABASE_POSTGRES_CONFIGURATION_LOG_CONNECTIONS: &str =
    "azure-database-postgres-configuration-log-connections";

// digitalocean
pub const DIGITALOCEAN_SPACES_ACL_NO_PUBLIC_READ: &str = "digitalocean-spaces-acl-no-public-read";
pub const LEGACY_DIGITALOCEAN_SPACES_ACL_NO_PUBLIC_READ: &str = "DIG005";

// google
pub const GOOGLE_COMPUTE_PROJECT_LEVEL_OSLOGIN: &str = "google-compute-project-level-oslogin";
