/// A named backend the token can be checked against
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub base_url: String,
}

/// Ordered endpoint list plus the active tab.
///
/// Switching tabs only moves the cursor; per-endpoint results live in
/// `ResultStore` and are never touched here.
#[derive(Debug, Clone)]
pub struct EndpointSelector {
    endpoints: Vec<Endpoint>,
    active: usize,
}

impl EndpointSelector {
    /// Returns `None` for an empty list, the first endpoint is active otherwise
    pub fn new(endpoints: Vec<Endpoint>) -> Option<Self> {
        if endpoints.is_empty() {
            return None;
        }
        Some(Self {
            endpoints,
            active: 0,
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn active(&self) -> &Endpoint {
        &self.endpoints[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Tabs are only drawn when there is something to switch between
    pub fn shows_tabs(&self) -> bool {
        self.endpoints.len() > 1
    }

    /// Make the endpoint named `key` active. Unknown keys are ignored.
    pub fn select_endpoint(&mut self, key: &str) -> bool {
        match self.endpoints.iter().position(|e| e.name == key) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.endpoints.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.endpoints.len();
    }

    pub fn previous(&mut self) {
        self.active = (self.active + self.endpoints.len() - 1) % self.endpoints.len();
    }
}
