/// Where the next picture lives and what to write under it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageResource {
    pub url: String,
    pub caption: String,
}

impl ImageResource {
    pub fn new(url: String, caption: String) -> Self {
        Self { url, caption }
    }
}
