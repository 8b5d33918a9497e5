use indexmap::IndexMap;

use crate::classifier::TypeClassifier;
use crate::order::VersionOrder;
use crate::paths;
use crate::topology::PathSets;
use crate::types::ParsedType;

/// One served version of a group, backed by one Go package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion {
    pub name: String,
    pub path: String,
    /// Every type declared in `path`, in universe order.
    pub types: Vec<ParsedType>,
    /// Names of the API resources among `types`.
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGroup {
    pub name: String,
    pub path: String,
    pub versions: Vec<ApiVersion>,
}

/// Group/version tree rooted at the apis package.
///
/// Groups are sorted by name and versions by the configured precedence, so
/// the tree is identical for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiModel {
    /// The apis root; empty when the universe has no resources.
    pub path: String,
    pub groups: Vec<ApiGroup>,
}

impl ApiModel {
    pub fn build(
        universe: &[ParsedType],
        paths: &PathSets,
        classifier: &dyn TypeClassifier,
        order: &dyn VersionOrder,
    ) -> Self {
        if paths.is_empty() {
            return Self::default();
        }

        let mut groups: IndexMap<String, IndexMap<String, ApiVersion>> = IndexMap::new();
        for versioned in &paths.versioned {
            let group_path = paths::parent(versioned);
            groups.entry(group_path).or_default().insert(
                versioned.clone(),
                ApiVersion {
                    name: paths::last_segment(versioned).to_string(),
                    path: versioned.clone(),
                    types: Vec::new(),
                    resources: Vec::new(),
                },
            );
        }

        for ty in universe {
            let group_path = paths::parent(ty.package());
            let Some(version) = groups
                .get_mut(&group_path)
                .and_then(|versions| versions.get_mut(ty.package()))
            else {
                continue;
            };
            if classifier.is_api_resource(ty) {
                version.resources.push(ty.type_name().to_string());
            }
            version.types.push(ty.clone());
        }

        let mut groups: Vec<ApiGroup> = groups
            .into_iter()
            .map(|(path, versions)| {
                let mut versions: Vec<ApiVersion> = versions.into_values().collect();
                versions.sort_by(|a, b| {
                    order
                        .compare(&a.name, &b.name)
                        .then_with(|| a.path.cmp(&b.path))
                });
                ApiGroup {
                    name: paths::last_segment(&path).to_string(),
                    path,
                    versions,
                }
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

        Self {
            path: paths.apis.clone(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() || self.groups.is_empty()
    }

    /// Grandparent of the apis root.
    pub fn project_root(&self) -> String {
        paths::parent(&paths::parent(&self.path))
    }

    pub fn versions(&self) -> impl Iterator<Item = (&ApiGroup, &ApiVersion)> {
        self.groups
            .iter()
            .flat_map(|group| group.versions.iter().map(move |version| (group, version)))
    }
}
