//! The closed set of PhyloXML element names understood by the parser and writer.
//!
//! Every tag the crate reads or writes goes through [`Tag`], so dispatch is a
//! `match` on an enum rather than a lookup by string.

/// Namespace of PhyloXML documents
pub const PHYLOXML_NAMESPACE: &str = "http://www.phyloxml.org";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Value written to `xsi:schemaLocation` on the root element
pub const SCHEMA_LOCATION: &str =
    "http://www.phyloxml.org http://www.phyloxml.org/1.10/phyloxml.xsd";

macro_rules! tags {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A recognized PhyloXML element name
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Tag {
            $(
                #[doc = concat!("`<", $name, ">`")]
                $variant,
            )+
        }

        impl Tag {
            /// Looks up a tag by its local (unprefixed) name.
            pub fn from_name(name: &[u8]) -> Option<Self> {
                match std::str::from_utf8(name).ok()? {
                    $($name => Some(Tag::$variant),)+
                    _ => None,
                }
            }

            /// The element name as written in documents.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)+
                }
            }
        }
    };
}

tags! {
    Phyloxml => "phyloxml",
    Phylogeny => "phylogeny",
    Clade => "clade",
    Name => "name",
    Description => "description",
    Id => "id",
    Date => "date",
    Confidence => "confidence",
    BranchLength => "branch_length",
    Width => "width",
    Color => "color",
    Red => "red",
    Green => "green",
    Blue => "blue",
    NodeId => "node_id",
    Taxonomy => "taxonomy",
    Code => "code",
    ScientificName => "scientific_name",
    Authority => "authority",
    CommonName => "common_name",
    Synonym => "synonym",
    Rank => "rank",
    Uri => "uri",
    Sequence => "sequence",
    Symbol => "symbol",
    Accession => "accession",
    Location => "location",
    MolSeq => "mol_seq",
    Annotation => "annotation",
    Desc => "desc",
    Property => "property",
    DomainArchitecture => "domain_architecture",
    Domain => "domain",
    Events => "events",
    Type => "type",
    Duplications => "duplications",
    Speciations => "speciations",
    Losses => "losses",
    BinaryCharacters => "binary_characters",
    Gained => "gained",
    Lost => "lost",
    Present => "present",
    Absent => "absent",
    Bc => "bc",
    Distribution => "distribution",
    Point => "point",
    Lat => "lat",
    Long => "long",
    Alt => "alt",
    Polygon => "polygon",
    Reference => "reference",
    Value => "value",
    Minimum => "minimum",
    Maximum => "maximum",
    CladeRelation => "clade_relation",
    SequenceRelation => "sequence_relation",
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

/// Allowed values of `events/type`
pub const EVENT_TYPES: &[&str] = &[
    "transfer",
    "fusion",
    "speciation_or_duplication",
    "other",
    "mixed",
    "unassigned",
];

/// Allowed values of `property/@datatype`
pub const PROPERTY_DATATYPES: &[&str] = &[
    "xsd:string",
    "xsd:boolean",
    "xsd:decimal",
    "xsd:float",
    "xsd:double",
    "xsd:duration",
    "xsd:dateTime",
    "xsd:time",
    "xsd:date",
    "xsd:gYearMonth",
    "xsd:gYear",
    "xsd:gMonthDay",
    "xsd:gDay",
    "xsd:gMonth",
    "xsd:hexBinary",
    "xsd:base64Binary",
    "xsd:anyURI",
    "xsd:normalizedString",
    "xsd:token",
    "xsd:integer",
    "xsd:nonPositiveInteger",
    "xsd:negativeInteger",
    "xsd:long",
    "xsd:int",
    "xsd:short",
    "xsd:byte",
    "xsd:nonNegativeInteger",
    "xsd:unsignedLong",
    "xsd:unsignedInt",
    "xsd:unsignedShort",
    "xsd:unsignedByte",
    "xsd:positiveInteger",
];

/// Allowed values of `property/@applies_to`
pub const PROPERTY_APPLIES_TO: &[&str] = &[
    "phylogeny",
    "clade",
    "node",
    "annotation",
    "parent_branch",
    "other",
];

/// Allowed values of `sequence/@type`
pub const SEQUENCE_TYPES: &[&str] = &["dna", "rna", "protein"];

/// Allowed values of `sequence_relation/@type`
pub const SEQUENCE_RELATION_TYPES: &[&str] = &[
    "orthology",
    "one_to_one_orthology",
    "super_orthology",
    "paralogy",
    "ultra_paralogy",
    "xenology",
    "unknown",
    "other",
];

/// Allowed values of `taxonomy/rank`
pub const TAXONOMY_RANKS: &[&str] = &[
    "domain",
    "kingdom",
    "subkingdom",
    "branch",
    "infrakingdom",
    "superphylum",
    "phylum",
    "subphylum",
    "infraphylum",
    "microphylum",
    "superdivision",
    "division",
    "subdivision",
    "infradivision",
    "superclass",
    "class",
    "subclass",
    "infraclass",
    "superlegion",
    "legion",
    "sublegion",
    "infralegion",
    "supercohort",
    "cohort",
    "subcohort",
    "infracohort",
    "superorder",
    "order",
    "suborder",
    "superfamily",
    "family",
    "subfamily",
    "supertribe",
    "tribe",
    "subtribe",
    "infratribe",
    "genus",
    "subgenus",
    "superspecies",
    "species",
    "subspecies",
    "variety",
    "subvariety",
    "form",
    "subform",
    "cultivar",
    "unknown",
    "other",
];

/// Whether `value` is one of `allowed`.
pub fn is_allowed(allowed: &[&str], value: &str) -> bool {
    allowed.contains(&value)
}
