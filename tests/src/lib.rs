//! End-to-end tests: the reqwest transport against mocked open-data endpoints.

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod lookup;
