use std::collections::BTreeSet;

use tracing::debug;

use crate::classifier::TypeClassifier;
use crate::error::TopologyError;
use crate::paths;
use crate::types::ParsedType;

/// Package paths derived from the API resources of a type universe.
///
/// `apis` and `main` are empty when the universe holds no resource; that is
/// the valid "nothing to generate" case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSets {
    /// One entry per distinct package holding a resource.
    pub versioned: BTreeSet<String>,
    /// Parent directory of each versioned package (the group packages).
    pub unversioned: BTreeSet<String>,
    /// Parent of every unversioned package.
    pub apis: String,
    /// Parent of `apis`.
    pub main: String,
}

impl PathSets {
    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}

/// Folds a type universe into its [`PathSets`].
pub struct TopologyResolver<'c> {
    classifier: &'c dyn TypeClassifier,
}

impl<'c> TopologyResolver<'c> {
    pub fn new(classifier: &'c dyn TypeClassifier) -> Self {
        Self { classifier }
    }

    /// Walk `types` in the order given and derive the package paths.
    ///
    /// Every versioned package must share the same apis root; the first
    /// conflicting root is reported together with the one already adopted.
    pub fn resolve(&self, types: &[ParsedType]) -> Result<PathSets, TopologyError> {
        let mut versioned = BTreeSet::new();
        let mut unversioned = BTreeSet::new();
        let mut apis: Option<String> = None;

        for ty in types {
            if !self.classifier.is_api_resource(ty) {
                continue;
            }
            debug!(resource = %ty.name, "classified api resource");

            versioned.insert(ty.package().to_string());
            let group = paths::parent(ty.package());
            if !unversioned.insert(group.clone()) {
                continue;
            }

            let candidate = paths::parent(&group);
            match &apis {
                Some(current) if *current != candidate => {
                    return Err(TopologyError::MultipleApisRoots {
                        first: current.clone(),
                        second: candidate,
                    });
                }
                Some(_) => {}
                None => apis = Some(candidate),
            }
        }

        let apis = apis.unwrap_or_default();
        let main = if apis.is_empty() {
            String::new()
        } else {
            paths::parent(&apis)
        };

        Ok(PathSets {
            versioned,
            unversioned,
            apis,
            main,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MarkerClassifier;
    use crate::test_support::resource;

    fn resolve(types: &[ParsedType]) -> Result<PathSets, TopologyError> {
        let classifier = MarkerClassifier::default();
        TopologyResolver::new(&classifier).resolve(types)
    }

    #[test]
    fn derives_every_path_set() {
        let types = vec![
            resource("pkg/apis/mygroup/v1", "Foo"),
            ParsedType::new("pkg/apis/mygroup/v1", "FooSpec"),
            resource("pkg/apis/mygroup/v1beta1", "Foo"),
            resource("pkg/apis/other/v1", "Bar"),
        ];
        let sets = resolve(&types).unwrap();

        assert_eq!(
            sets.versioned.iter().collect::<Vec<_>>(),
            vec![
                "pkg/apis/mygroup/v1",
                "pkg/apis/mygroup/v1beta1",
                "pkg/apis/other/v1",
            ]
        );
        assert_eq!(
            sets.unversioned.iter().collect::<Vec<_>>(),
            vec!["pkg/apis/mygroup", "pkg/apis/other"]
        );
        assert_eq!(sets.apis, "pkg/apis");
        assert_eq!(sets.main, "pkg");
    }

    #[test]
    fn result_does_not_depend_on_group_order() {
        let forward = vec![
            resource("pkg/apis/a/v1", "Foo"),
            resource("pkg/apis/b/v1", "Bar"),
        ];
        let reversed: Vec<ParsedType> = forward.iter().rev().cloned().collect();

        assert_eq!(resolve(&forward).unwrap(), resolve(&reversed).unwrap());
    }

    #[test]
    fn conflicting_apis_roots_are_rejected() {
        let types = vec![
            resource("pkg/apis/mygroup/v1", "Foo"),
            resource("other/apis/mygroup/v1", "Bar"),
        ];

        assert_eq!(
            resolve(&types).unwrap_err(),
            TopologyError::MultipleApisRoots {
                first: "pkg/apis".to_string(),
                second: "other/apis".to_string(),
            }
        );
    }

    #[test]
    fn non_resource_types_never_affect_the_roots() {
        let types = vec![
            resource("pkg/apis/mygroup/v1", "Foo"),
            ParsedType::new("elsewhere/types/v1", "Helper"),
        ];
        let sets = resolve(&types).unwrap();
        assert_eq!(sets.apis, "pkg/apis");
        assert_eq!(sets.versioned.len(), 1);
    }

    #[test]
    fn empty_universe_yields_empty_sets() {
        let sets = resolve(&[]).unwrap();
        assert!(sets.is_empty());
        assert!(sets.versioned.is_empty());
        assert!(sets.unversioned.is_empty());
        assert_eq!(sets.main, "");
    }
}
