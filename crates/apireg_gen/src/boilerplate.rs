use std::sync::Arc;

use tracing::warn;

use crate::error::BoilerplateError;

/// Header used when the configured boilerplate cannot be loaded.
pub const FALLBACK_HEADER: &str = r#"/*
Copyright 2017 The Kubernetes Authors.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

// This file was autogenerated by apiregister-gen. Do not edit it manually!

"#;

/// Source of the license header prepended to every generated file.
pub trait BoilerplateLoader {
    fn load(&self) -> Result<Vec<u8>, BoilerplateError>;
}

/// Load the header, degrading to [`FALLBACK_HEADER`] on failure.
pub fn load_or_fallback(loader: &dyn BoilerplateLoader) -> Arc<[u8]> {
    match loader.load() {
        Ok(header) => Arc::from(header),
        Err(error) => {
            warn!(%error, "failed loading boilerplate, falling back to default boilerplate");
            Arc::from(FALLBACK_HEADER.as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl BoilerplateLoader for Fixed {
        fn load(&self) -> Result<Vec<u8>, BoilerplateError> {
            self.0
                .map(|text| text.as_bytes().to_vec())
                .ok_or(BoilerplateError::NotConfigured)
        }
    }

    #[test]
    fn loaded_header_is_used_verbatim() {
        let header = load_or_fallback(&Fixed(Some("// Copyright Acme\n\n")));
        assert_eq!(&*header, b"// Copyright Acme\n\n");
    }

    #[test]
    fn failing_loader_falls_back_to_fixed_header() {
        let header = load_or_fallback(&Fixed(None));
        assert_eq!(&*header, FALLBACK_HEADER.as_bytes());
    }

    #[test]
    fn fallback_header_ends_with_autogenerated_notice() {
        assert!(FALLBACK_HEADER.starts_with("/*\nCopyright 2017 The Kubernetes Authors.\n"));
        assert!(FALLBACK_HEADER.ends_with(
            "*/\n\n// This file was autogenerated by apiregister-gen. Do not edit it manually!\n\n"
        ));
    }
}
