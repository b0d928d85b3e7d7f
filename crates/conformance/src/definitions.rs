//! Resource definition resolution.
//!
//! Maps a resource type name, as bound in the registry, to its canonical name
//! and profile URL. Resolution failures are configuration errors: a server
//! that binds handlers to a type it cannot describe is misconfigured.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConformanceError, ConformanceResult};

/// Default base URL for resource profiles.
pub const DEFAULT_PROFILE_BASE: &str = "http://hl7.org/fhir/StructureDefinition";

/// Canonical description of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Canonical resource type name (e.g. "Patient").
    pub name: String,
    /// Profile URL describing the resource.
    pub profile: String,
}

/// Resolves resource type names to their definitions.
pub trait DefinitionResolver: Send + Sync {
    /// Returns the definition for a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::UnknownResourceType`] if the type is not known.
    fn resolve(&self, resource_name: &str) -> ConformanceResult<ResourceDefinition>;
}

/// FHIR resource types known to the static resolver.
const KNOWN_RESOURCE_TYPES: &[&str] = &[
    "Account",
    "ActivityDefinition",
    "AdverseEvent",
    "AllergyIntolerance",
    "Appointment",
    "AppointmentResponse",
    "AuditEvent",
    "Basic",
    "Binary",
    "BiologicallyDerivedProduct",
    "BodyStructure",
    "Bundle",
    "CapabilityStatement",
    "CarePlan",
    "CareTeam",
    "CatalogEntry",
    "ChargeItem",
    "ChargeItemDefinition",
    "Claim",
    "ClaimResponse",
    "ClinicalImpression",
    "CodeSystem",
    "Communication",
    "CommunicationRequest",
    "CompartmentDefinition",
    "Composition",
    "ConceptMap",
    "Condition",
    "Consent",
    "Contract",
    "Coverage",
    "CoverageEligibilityRequest",
    "CoverageEligibilityResponse",
    "DetectedIssue",
    "Device",
    "DeviceDefinition",
    "DeviceMetric",
    "DeviceRequest",
    "DeviceUseStatement",
    "DiagnosticReport",
    "DocumentManifest",
    "DocumentReference",
    "EffectEvidenceSynthesis",
    "Encounter",
    "Endpoint",
    "EnrollmentRequest",
    "EnrollmentResponse",
    "EpisodeOfCare",
    "EventDefinition",
    "Evidence",
    "EvidenceVariable",
    "ExampleScenario",
    "ExplanationOfBenefit",
    "FamilyMemberHistory",
    "Flag",
    "Goal",
    "GraphDefinition",
    "Group",
    "GuidanceResponse",
    "HealthcareService",
    "ImagingStudy",
    "Immunization",
    "ImmunizationEvaluation",
    "ImmunizationRecommendation",
    "ImplementationGuide",
    "InsurancePlan",
    "Invoice",
    "Library",
    "Linkage",
    "List",
    "Location",
    "Measure",
    "MeasureReport",
    "Media",
    "Medication",
    "MedicationAdministration",
    "MedicationDispense",
    "MedicationKnowledge",
    "MedicationRequest",
    "MedicationStatement",
    "MedicinalProduct",
    "MedicinalProductAuthorization",
    "MedicinalProductContraindication",
    "MedicinalProductIndication",
    "MedicinalProductIngredient",
    "MedicinalProductInteraction",
    "MedicinalProductManufactured",
    "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical",
    "MedicinalProductUndesirableEffect",
    "MessageDefinition",
    "MessageHeader",
    "MolecularSequence",
    "NamingSystem",
    "NutritionOrder",
    "Observation",
    "ObservationDefinition",
    "OperationDefinition",
    "OperationOutcome",
    "Organization",
    "OrganizationAffiliation",
    "Parameters",
    "Patient",
    "PaymentNotice",
    "PaymentReconciliation",
    "Person",
    "PlanDefinition",
    "Practitioner",
    "PractitionerRole",
    "Procedure",
    "Provenance",
    "Questionnaire",
    "QuestionnaireResponse",
    "RelatedPerson",
    "RequestGroup",
    "ResearchDefinition",
    "ResearchElementDefinition",
    "ResearchStudy",
    "ResearchSubject",
    "RiskAssessment",
    "RiskEvidenceSynthesis",
    "Schedule",
    "SearchParameter",
    "ServiceRequest",
    "Slot",
    "Specimen",
    "SpecimenDefinition",
    "StructureDefinition",
    "StructureMap",
    "Subscription",
    "Substance",
    "SubstanceNucleicAcid",
    "SubstancePolymer",
    "SubstanceProtein",
    "SubstanceReferenceInformation",
    "SubstanceSourceMaterial",
    "SubstanceSpecification",
    "SupplyDelivery",
    "SupplyRequest",
    "Task",
    "TerminologyCapabilities",
    "TestReport",
    "TestScript",
    "ValueSet",
    "VerificationResult",
    "ViewDefinition",
    "VisionPrescription",
];

/// Resolver backed by a fixed table of resource type names.
///
/// Lookup is exact first, then case-insensitive, so a registry binding of
/// `"patient"` resolves to the canonical `"Patient"`. In permissive mode any
/// capitalized alphanumeric name is accepted as its own canonical name, which
/// lets servers expose custom resource types.
#[derive(Debug, Clone)]
pub struct StaticDefinitionResolver {
    profile_base: String,
    canonical: HashMap<String, String>,
    permissive: bool,
}

impl Default for StaticDefinitionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_BASE)
    }
}

impl StaticDefinitionResolver {
    /// Creates a resolver over the built-in FHIR resource types.
    pub fn new(profile_base: impl Into<String>) -> Self {
        Self::with_resource_types(profile_base, KNOWN_RESOURCE_TYPES.iter().copied())
    }

    /// Creates a resolver over an explicit set of resource type names.
    pub fn with_resource_types<'a>(
        profile_base: impl Into<String>,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let canonical = names
            .into_iter()
            .map(|name| (name.to_lowercase(), name.to_string()))
            .collect();
        Self {
            profile_base: profile_base.into().trim_end_matches('/').to_string(),
            canonical,
            permissive: false,
        }
    }

    /// Accepts unknown but well-formed resource type names.
    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// Adds a resource type to the table.
    pub fn with_resource_type(mut self, name: &str) -> Self {
        self.canonical.insert(name.to_lowercase(), name.to_string());
        self
    }

    /// Returns the profile base URL.
    pub fn profile_base(&self) -> &str {
        &self.profile_base
    }

    fn profile_url(&self, name: &str) -> String {
        format!("{}/{}", self.profile_base, name)
    }
}

/// Returns true for names shaped like a resource type: `[A-Z][A-Za-z0-9]*`.
fn is_well_formed(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

impl DefinitionResolver for StaticDefinitionResolver {
    fn resolve(&self, resource_name: &str) -> ConformanceResult<ResourceDefinition> {
        let name = match self.canonical.get(&resource_name.to_lowercase()) {
            Some(name) => name.clone(),
            None if self.permissive && is_well_formed(resource_name) => resource_name.to_string(),
            None => {
                return Err(ConformanceError::UnknownResourceType {
                    resource_type: resource_name.to_string(),
                });
            }
        };

        Ok(ResourceDefinition {
            profile: self.profile_url(&name),
            name,
        })
    }
}
