pub enum ApiRoute {
    ProcessImages,
    JobStatus,
    History,
}

impl ApiRoute {
    pub fn path(&self) -> &'static str {
        match self {
            ApiRoute::ProcessImages => "/api/process-images",
            ApiRoute::JobStatus => "/api/status",
            ApiRoute::History => "/api/history",
        }
    }

    pub fn target(&self, base_url: impl AsRef<str>) -> String {
        format!("{}{}", base_url.as_ref().trim_end_matches('/'), self.path())
    }
}
