//! Wire shapes of the catalog HTTP API.

use serde::Deserialize;

use crate::catalog::error::CatalogError;
use crate::catalog::model::{CatalogItem, ItemDetail, Page, PageToken, Stat};

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

/// Extract the numeric id from a resource URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

impl PageResponse {
    /// Convert into a domain page. `token` is the request that produced this
    /// response; `sprite_base_url` is used to build thumbnail URLs.
    pub fn into_page(
        self,
        token: PageToken,
        sprite_base_url: &str,
    ) -> Result<Page<CatalogItem>, CatalogError> {
        let base = sprite_base_url.trim_end_matches('/');
        let items = self
            .results
            .into_iter()
            .map(|resource| {
                let id = id_from_url(&resource.url).ok_or_else(|| {
                    CatalogError::Decode(format!("no id in resource url '{}'", resource.url))
                })?;
                Ok(CatalogItem {
                    id,
                    thumbnail_url: format!("{base}/{id}.png"),
                    name: resource.name,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let next = match (&self.next, self.count) {
            (None, _) => None,
            (Some(_), Some(count)) if token.offset.saturating_add(token.limit) >= count => None,
            (Some(_), _) if items.is_empty() => None,
            (Some(_), _) => Some(token.following()),
        };

        Ok(Page {
            items,
            next,
            total: self.count,
        })
    }
}

impl From<DetailResponse> for ItemDetail {
    fn from(dto: DetailResponse) -> Self {
        ItemDetail {
            id: dto.id,
            name: dto.name,
            height: dto.height,
            weight: dto.weight,
            base_experience: dto.base_experience,
            types: dto.types.into_iter().map(|slot| slot.kind.name).collect(),
            abilities: dto
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            stats: dto
                .stats
                .into_iter()
                .map(|slot| Stat {
                    name: slot.stat.name,
                    value: slot.base_stat,
                })
                .collect(),
            sprite_url: dto.sprites.front_default,
        }
    }
}
