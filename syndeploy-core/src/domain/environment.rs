///////////////////////////////////////////////////////////////////////////////
// CloudEnvironment
///////////////////////////////////////////////////////////////////////////////

/// Identity and subscription information of the authenticated session.
/// Captured once during discovery and threaded explicitly through every
/// subsequent step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudEnvironment {
    pub subscription_name: String,
    pub subscription_id: String,
    pub tenant_id: String,
    /// User principal name of the signed-in user
    pub username: String,
    /// Directory object id of the signed-in user
    pub object_id: String,
}
