//! Tenant context boundary

#[cfg(test)]
use mockall::mock;

/// Per-tenant/environment surface consumed during rendering
pub trait TenantContext: Send + Sync {
    /// The display title interpolated into subjects through the reserved
    /// title variable
    fn display_title(&self) -> String;

    /// Absolute URL of a page on the tenant's instance
    fn page_url(&self, path: &str, query: Option<&str>) -> String;

    /// Tenant/environment discriminator used for scoped asset and catalog
    /// lookup
    fn context_name(&self) -> String;
}

#[cfg(test)]
mock! {
    pub TenantContext {}

    impl TenantContext for TenantContext {
        fn display_title(&self) -> String;
        fn page_url<'a>(&self, path: &str, query: Option<&'a str>) -> String;
        fn context_name(&self) -> String;
    }
}
