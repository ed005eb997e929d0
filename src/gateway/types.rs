use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Types
// ============================================================================

/// Lightweight record shown in list views.
///
/// `id` is derived from the position in the paginated listing, not from the
/// API's own numeric id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub url: String,
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<PokemonDetails>,
}

/// Full record fetched lazily for a single Pokémon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub types: Vec<PokemonType>,
    pub artwork_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonType {
    pub type_name: String,
}

impl PokemonDetails {
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.type_name.as_str()).collect()
    }

    pub fn height_metres(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kilograms(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}

// ============================================================================
// PokeAPI Wire Types
// ============================================================================

/// `{ results: [{name, url}, ...] }` from the list endpoint.
///
/// A missing `results` field reads as an empty page.
#[derive(Deserialize, Debug)]
pub struct RawPage {
    #[serde(default)]
    pub results: Vec<RawNamedResource>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawNamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct RawDetails {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub sprites: RawSprites,
}

#[derive(Deserialize, Debug)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub kind: RawNamedResource,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawSprites {
    #[serde(default)]
    pub other: RawOtherSprites,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: RawArtwork,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl RawPage {
    /// Converts a page into summaries numbered from `offset + 1`.
    pub fn into_summaries(self, offset: usize) -> Vec<PokemonSummary> {
        self.results
            .into_iter()
            .enumerate()
            .map(|(index, raw)| PokemonSummary {
                id: (offset + index + 1) as u32,
                name: capitalize(&raw.name),
                url: raw.url,
                favorite: false,
                details: None,
            })
            .collect()
    }
}

impl From<RawDetails> for PokemonDetails {
    fn from(raw: RawDetails) -> Self {
        PokemonDetails {
            id: raw.id,
            name: capitalize(&raw.name),
            height: raw.height,
            weight: raw.weight,
            types: raw
                .types
                .into_iter()
                .map(|slot| PokemonType {
                    type_name: slot.kind.name,
                })
                .collect(),
            artwork_url: raw.sprites.other.official_artwork.front_default,
        }
    }
}
