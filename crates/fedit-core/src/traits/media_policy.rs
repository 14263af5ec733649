pub trait MediaPolicy: Send + Sync + 'static {
    /// Whether media from this origin must neither be stored nor downloaded
    fn is_media_rejected(&self, domain: &str) -> bool;
}
