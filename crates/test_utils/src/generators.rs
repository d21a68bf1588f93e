//! Property-Based Test Generators
//!
//! Proptest strategies for configuration inputs that maintain the
//! declaration invariants: identifiers stay identifiers, packages stay
//! well-formed, locations stay non-blank.

use proptest::prelude::*;

use chaincode_client::ChaincodeId;
use repo_config::{EnablementConfig, PackageRef, TypeRef};
use repo_support::RepositoryCandidate;

/// Strategy for a lower-case identifier segment
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

/// Strategy for a valid package path with 1 to 4 segments
pub fn package_ref_strategy() -> impl Strategy<Value = PackageRef> {
    proptest::collection::vec(segment_strategy(), 1..4).prop_map(|segments| {
        PackageRef::parse(segments.join("::")).expect("generated package is valid")
    })
}

/// Strategy for a CamelCase type name
pub fn type_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,14}"
}

/// Strategy for a valid implementation postfix
pub fn postfix_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,7}"
}

/// Strategy for a non-blank client reference name
pub fn client_reference_strategy() -> impl Strategy<Value = String> {
    "[a-z][A-Za-z0-9]{0,14}"
}

/// Strategy for a non-blank named-queries location
pub fn location_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}/[a-z]{1,8}\\.properties"
}

/// Strategy for chaincode coordinates
pub fn chaincode_id_strategy() -> impl Strategy<Value = ChaincodeId> {
    (
        segment_strategy(),
        segment_strategy(),
        proptest::option::of("[0-9]\\.[0-9]"),
    )
        .prop_map(|(channel, name, version)| {
            let id = ChaincodeId::new(channel, name);
            match version {
                Some(version) => id.with_version(version),
                None => id,
            }
        })
}

/// Strategy for a repository candidate
pub fn candidate_strategy() -> impl Strategy<Value = RepositoryCandidate> {
    (
        type_name_strategy(),
        package_ref_strategy(),
        chaincode_id_strategy(),
    )
        .prop_map(|(name, package, chaincode)| {
            RepositoryCandidate::new(name, package, chaincode)
                .expect("generated candidate is valid")
        })
}

/// Explicit non-default values for every configurable field.
///
/// Generated inputs always produce a buildable configuration, so round-trip
/// properties can compare accessors field by field.
#[derive(Debug, Clone)]
pub struct EnablementInputs {
    pub packages: Vec<PackageRef>,
    pub postfix: String,
    pub location: Option<String>,
    pub client_reference: String,
    pub factory_name: String,
    pub base_name: String,
}

impl EnablementInputs {
    /// Builds the configuration these inputs describe
    pub fn build(&self) -> EnablementConfig {
        let mut builder = EnablementConfig::builder()
            .with_base_packages(self.packages.iter().cloned())
            .with_implementation_postfix(&self.postfix)
            .with_client_reference(&self.client_reference)
            .with_factory_type(TypeRef::named(&self.factory_name).expect("generated factory name"))
            .with_base_type(TypeRef::named(&self.base_name).expect("generated base name"));
        if let Some(location) = &self.location {
            builder = builder.with_named_queries_location(location);
        }
        builder.build().expect("generated inputs are valid")
    }
}

/// Strategy for full configuration inputs
pub fn enablement_inputs_strategy() -> impl Strategy<Value = EnablementInputs> {
    (
        proptest::collection::vec(package_ref_strategy(), 0..4),
        postfix_strategy(),
        proptest::option::of(location_strategy()),
        client_reference_strategy(),
        type_name_strategy(),
        type_name_strategy(),
    )
        .prop_map(
            |(packages, postfix, location, client_reference, factory_name, base_name)| {
                EnablementInputs {
                    packages,
                    postfix,
                    location,
                    client_reference,
                    factory_name,
                    base_name,
                }
            },
        )
}
