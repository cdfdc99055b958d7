use std::collections::HashMap;

use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

use crate::cards::card::Card;
use crate::cards::collector_number::face_letter;
use crate::cards::colour::{derive_color, ColourSource};
use crate::cards::expansion::Expansion;
use crate::cards::foreign_printing::ForeignPrinting;
use crate::cards::ptl::{parse_stats_row, NO_LOYALTY, NO_ONE_CARES};
use crate::cards::rarity::Rarity;
use crate::gatherer_client::{multiverse_id_from_href, GathererScraper, Page};
use crate::gatherer_quirks::{
    language_code, letters_faces, letters_printings, loyalty_override, manual_collector_number,
    VANGUARD_CODE,
};
use crate::utilities::string_manipulators::{clean_html, remove_non_ascii, LINE_BREAK};

const NAME_ROW: &str = "nameRow";

/// Everything the caller already knows about the expansion being scraped
pub struct DetailContext<'a> {
    pub expansion: &'a Expansion,
    pub name_to_id: &'a HashMap<String, u32>,
    pub prior_numbers: &'a HashMap<String, String>,
}

/// Raw field values of one face, as found on the page
#[derive(Debug, Default, Clone)]
struct RawFace {
    name: String,
    mana_cost: Option<String>,
    cmc: Option<String>,
    type_line: Option<String>,
    text: Option<String>,
    flavor: Option<String>,
    stats: Option<String>,
    rarity: Option<String>,
    artist: Option<String>,
    watermark: Option<String>,
    number: Option<String>,
    color_indicator: Option<String>,
}

/// Where a face sits: which printing page and which region of that page
#[derive(Debug, Clone, Copy)]
struct FacePosition {
    page_id: u32,
    printing_index: usize,
    printing_count: usize,
    face_index: usize,
    face_count: usize,
}

impl GathererScraper {
    /// Fetches every page of a stub and turns each face on them into a card.
    ///
    /// A page can hold several faces and a card can have several printings,
    /// so one stub may produce many cards.
    pub async fn extract_details(&self, stub: &Card, context: &DetailContext<'_>) -> Vec<Card> {
        let primary = self.fetch(&self.urls.details(stub.multiverse_id)).await;

        let mut page_ids = variation_ids(&primary);
        page_ids.push(stub.multiverse_id);
        page_ids.sort_unstable();
        page_ids.dedup();

        let mut pages: Vec<(u32, Page)> = Vec::with_capacity(page_ids.len());
        for id in &page_ids {
            if *id == stub.multiverse_id {
                pages.push((*id, primary.clone()));
            } else {
                debug!("Fetching variation {} of {}", id, stub.name);
                pages.push((*id, self.fetch(&self.urls.details(*id)).await));
            }
        }

        let mut cards: Vec<Card> = Vec::new();
        for (printing_index, (page_id, page)) in pages.iter().enumerate() {
            let faces = raw_faces(page);
            if faces.is_empty() {
                warn!("No card found on {}", page.url);
            }
            let face_count = faces.len();
            for (face_index, face) in faces.into_iter().enumerate() {
                let position = FacePosition {
                    page_id: *page_id,
                    printing_index,
                    printing_count: pages.len(),
                    face_index,
                    face_count,
                };
                cards.push(normalize_face(face, stub, position, context));
            }
        }

        let mut printings_by_id: HashMap<u32, Vec<ForeignPrinting>> = HashMap::new();
        for card in cards.iter_mut() {
            if card.multiverse_id == 0 {
                continue;
            }
            if !printings_by_id.contains_key(&card.multiverse_id) {
                let printings = self.foreign_printings(card.multiverse_id).await;
                printings_by_id.insert(card.multiverse_id, printings);
            }
            card.foreign_printings = printings_by_id
                .get(&card.multiverse_id)
                .cloned()
                .unwrap_or_default();
        }
        cards
    }

    /// Collects the localized printings listed for one printing, page by page,
    /// until a page is empty or repeats what was already seen
    pub async fn foreign_printings(&self, multiverse_id: u32) -> Vec<ForeignPrinting> {
        let mut printings: Vec<ForeignPrinting> = Vec::new();
        let mut page_number = 0;

        loop {
            let page = self
                .fetch(&self.urls.languages(multiverse_id, page_number))
                .await;
            let (entries, has_more_pages) = language_entries(&page);
            if entries.is_empty() {
                break;
            }
            if entries.iter().any(|entry| printings.contains(entry)) {
                break;
            }
            printings.extend(entries);
            if !has_more_pages {
                break;
            }
            page_number += 1;
        }

        printings.sort_by_key(|printing| printing.multiverse_id);
        printings.dedup();
        printings
    }
}

fn variation_ids(page: &Page) -> Vec<u32> {
    let document = page.document();
    let selector = Selector::parse(r#"[id*="variationLinks"] a.variationLink"#).unwrap();
    document
        .select(&selector)
        .filter_map(|link| link.value().attr("id"))
        .filter_map(|id| id.trim().parse::<u32>().ok())
        .collect()
}

fn raw_faces(page: &Page) -> Vec<RawFace> {
    let document = page.document();
    let selector = Selector::parse(&format!(r#"[id$="{}"]"#, NAME_ROW)).unwrap();

    document
        .select(&selector)
        .filter_map(|name_row| {
            let id = name_row.value().id()?;
            let prefix = id.strip_suffix(NAME_ROW)?;
            let fields = FieldLookup::new(&document, prefix);
            let name = fields.get(NAME_ROW, "value", true)?;
            if name.is_empty() {
                return None;
            }
            let flavor = fields
                .get("FlavorText", "flavortextbox", false)
                .filter(|flavor| !flavor.is_empty())
                .or_else(|| fields.get("FlavorText", "cardtextbox", false));

            Some(RawFace {
                name,
                mana_cost: fields.get("manaRow", "value", true),
                cmc: fields.get("cmcRow", "value", true),
                type_line: fields.get("typeRow", "value", true),
                text: fields.get("textRow", "cardtextbox", false),
                flavor,
                stats: fields.get("ptRow", "value", true),
                rarity: fields.get("rarityRow", "value", true),
                artist: fields.get("ArtistCredit", "value", true),
                watermark: fields.get("markRow", "value", true),
                number: fields.get("numberRow", "value", true),
                color_indicator: fields.get("colorIndicatorRow", "value", true),
            })
        })
        .collect()
}

/// Reads the labelled rows of one face region of a detail page
struct FieldLookup<'a> {
    document: &'a Html,
    prefix: &'a str,
}

impl<'a> FieldLookup<'a> {
    fn new(document: &'a Html, prefix: &'a str) -> Self {
        Self { document, prefix }
    }

    /// Cleaned markup of every `class` element inside the row `prefix + suffix`
    fn get(&self, suffix: &str, class: &str, remove_newlines: bool) -> Option<String> {
        let row_selector = Selector::parse(&format!(r#"[id="{}{}"]"#, self.prefix, suffix)).ok()?;
        let value_selector = Selector::parse(&format!(r#"[class*="{}"]"#, class)).ok()?;

        let row = self.document.select(&row_selector).next()?;
        let mut values: Vec<ElementRef> = Vec::new();
        if value_selector.matches(&row) {
            values.push(row);
        }
        values.extend(row.select(&value_selector));
        if values.is_empty() {
            return None;
        }

        let html = values
            .iter()
            .map(|value| value.html())
            .collect::<Vec<String>>()
            .join("");
        Some(clean_html(&html, remove_newlines))
    }
}

fn normalize_face(
    face: RawFace,
    stub: &Card,
    position: FacePosition,
    context: &DetailContext<'_>,
) -> Card {
    let code = context.expansion.code_gatherer.as_str();

    let multiverse_id = if position.printing_count > 1 {
        position.page_id
    } else {
        context
            .name_to_id
            .get(&face.name)
            .copied()
            .unwrap_or(stub.multiverse_id)
    };

    let mut card = Card::new(&face.name, code, multiverse_id);
    card.mana_cost = face.mana_cost.unwrap_or_default();
    card.cmc = face
        .cmc
        .as_deref()
        .and_then(|cmc| cmc.trim().parse::<u32>().ok())
        .unwrap_or(0);
    card.type_line = face.type_line.unwrap_or_default();
    card.text = face.text.unwrap_or_default();
    card.flavor = face.flavor.unwrap_or_default();
    card.artist = face.artist.unwrap_or_default();
    card.watermark = face.watermark.unwrap_or_default();
    card.rarity = Rarity::from_gatherer(face.rarity.as_deref().unwrap_or_default(), code);

    let stats_row = face.stats.unwrap_or_default();
    if code == VANGUARD_CODE {
        if !stats_row.is_empty() {
            card.text = format!("{}{}{}", card.text, LINE_BREAK.repeat(3), stats_row);
        }
        card.power = NO_ONE_CARES;
        card.toughness = NO_ONE_CARES;
        card.loyalty = NO_LOYALTY;
    } else {
        let stats = parse_stats_row(&stats_row);
        card.power = stats.power;
        card.toughness = stats.toughness;
        card.loyalty = stats.loyalty;
    }
    if let Some(loyalty) = loyalty_override(code, &card.name) {
        card.loyalty = loyalty;
    }

    card.color = derive_color(&ColourSource {
        name: &card.name,
        expansion: code,
        type_line: &card.type_line,
        mana_cost: &card.mana_cost,
        color_indicator: face.color_indicator.as_deref().unwrap_or_default(),
        text: &card.text,
    });

    card.number = collector_number(&card, face.number.unwrap_or_default(), position, context);
    card
}

fn collector_number(
    card: &Card,
    row: String,
    position: FacePosition,
    context: &DetailContext<'_>,
) -> String {
    let code = context.expansion.code_gatherer.as_str();
    if let Some(number) = manual_collector_number(code, &card.name) {
        return number.to_string();
    }
    if let Some(number) = cached_number(context.prior_numbers, card) {
        return number;
    }

    let mut number = row.trim().to_string();
    let ends_in_letter = number
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic());
    if !number.is_empty() && !ends_in_letter {
        if letters_faces(code) && position.face_count > 1 {
            number.push(face_letter(position.face_index));
        } else if letters_printings(code) && position.printing_count > 1 {
            number.push(face_letter(position.printing_index));
        }
    }
    if number.is_empty() {
        warn!(
            "No collector number for {} ({}) in {}",
            card.name, card.multiverse_id, code
        );
    }
    number
}

/// Previous runs stored names with ligatures or with non-ASCII characters
/// folded away, so both spellings are tried
fn cached_number(prior_numbers: &HashMap<String, String>, card: &Card) -> Option<String> {
    let ligature_name = card.name.replace("Ae", "Æ").replace("ae", "æ");
    let ascii_name = remove_non_ascii(&card.name);
    [card.name.as_str(), ligature_name.as_str(), ascii_name.as_str()]
        .iter()
        .map(|name| format!("{}{}", card.multiverse_id, name))
        .find_map(|key| prior_numbers.get(&key))
        .filter(|number| !number.is_empty())
        .cloned()
}

fn language_entries(page: &Page) -> (Vec<ForeignPrinting>, bool) {
    let document = page.document();
    let row_selector = Selector::parse(r#"tr[class*="cardItem"]"#).unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let link_selector = Selector::parse("a").unwrap();
    let paging_selector = Selector::parse(r#"[class*="pagingcontrols"] a"#).unwrap();

    let entries = document
        .select(&row_selector)
        .filter_map(|row| {
            let mut cells = row.select(&cell_selector);
            let name_cell = cells.next()?;
            let language_cell = cells.next()?;

            let link = name_cell.select(&link_selector).next()?;
            let id = multiverse_id_from_href(&page.url, link.value().attr("href")?)?;
            let name = link.text().collect::<String>().trim().to_string();
            let language = clean_html(&language_cell.inner_html(), true);

            match language_code(&language) {
                Some(code) => Some(ForeignPrinting::new(id, &name, code)),
                None => {
                    warn!("Unknown language '{}' for {} ({})", language, name, id);
                    None
                }
            }
        })
        .collect();

    let has_more_pages = document.select(&paging_selector).next().is_some();
    (entries, has_more_pages)
}
