//! Servicio de exposé
//!
//! Genera el documento de marketing de un vehículo: pide al generador de
//! texto un documento estructurado `{"sections":[{"heading","body"}]}`,
//! lo inserta junto a las imágenes en la plantilla HTML y, si se pide,
//! lo convierte a PDF. Si la generación falla se usan secciones estáticas.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::expose::ExposeConfig;
use crate::models::VehicleRecord;
use crate::services::pdf_service::SharedPdfRenderer;
use crate::services::text_generation_service::SharedTextGenerator;
use crate::utils::errors::AppResult;

const EXPOSE_MAX_TOKENS: u32 = 1800;
const DESCRIPTION_MAX_TOKENS: u32 = 400;
const CONTENT_IMAGE_COUNT: usize = 5;
const NOT_SPECIFIED: &str = "k. A.";

/// Sección de texto del exposé
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExposeSection {
    pub heading: String,
    pub body: String,
}

impl ExposeSection {
    fn new(heading: &str, body: &str) -> Self {
        Self {
            heading: heading.to_string(),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedExpose {
    sections: Vec<ExposeSection>,
}

/// Secciones estáticas usadas cuando el generador falla
pub fn fallback_sections() -> Vec<ExposeSection> {
    vec![
        ExposeSection::new(
            "Außendesign",
            "Dieses Fahrzeug besticht durch sein elegantes Außendesign mit fließenden Linien und kraftvoller Präsenz auf der Straße. Die Proportionen sind perfekt ausbalanciert und verleihen dem Wagen eine sportliche, aber zugleich elegante Erscheinung.",
        ),
        ExposeSection::new(
            "Innenraum & Komfort",
            "Im Innenraum erwartet Sie hochwertige Verarbeitung und durchdachte Ergonomie. Die Materialauswahl entspricht höchsten Qualitätsstandards. Jedes Detail wurde sorgfältig gestaltet, um maximalen Komfort und Funktionalität zu gewährleisten.",
        ),
        ExposeSection::new(
            "Fahrdynamik & Motor",
            "Das Herzstück dieses Fahrzeugs ist der leistungsstarke und effiziente Motor, der beeindruckende Fahrleistungen bietet. Die ausgewogene Fahrwerksabstimmung sorgt für ein sportliches Fahrgefühl bei gleichzeitig hohem Komfort.",
        ),
        ExposeSection::new(
            "Technologie & Innovation",
            "Ausgestattet mit moderner Technologie bietet dieses Fahrzeug innovative Funktionen für Sicherheit, Unterhaltung und Konnektivität. Die intuitive Bedienung macht jede Fahrt zum Vergnügen.",
        ),
    ]
}

/// Leer las secciones de la respuesta del generador.
///
/// Tolera bloques de código alrededor del JSON. `None` si no hay ninguna
/// sección utilizable.
pub fn parse_sections(text: &str) -> Option<Vec<ExposeSection>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    let generated: GeneratedExpose = serde_json::from_str(&text[start..=end]).ok()?;
    let sections: Vec<ExposeSection> = generated
        .sections
        .into_iter()
        .map(|s| ExposeSection::new(s.heading.trim(), s.body.trim()))
        .filter(|s| !s.heading.is_empty() && !s.body.is_empty())
        .collect();

    (!sections.is_empty()).then_some(sections)
}

pub struct ExposeService {
    generator: SharedTextGenerator,
    renderer: SharedPdfRenderer,
    config: ExposeConfig,
}

impl ExposeService {
    pub fn new(generator: SharedTextGenerator, renderer: SharedPdfRenderer, config: ExposeConfig) -> Self {
        Self {
            generator,
            renderer,
            config,
        }
    }

    /// Secciones generadas, o las estáticas si la generación falla
    pub async fn generate_sections(&self, vehicle: &VehicleRecord) -> Vec<ExposeSection> {
        let prompt = expose_prompt(vehicle, &self.config.dealer_name);
        match self.generator.generate(&prompt, EXPOSE_MAX_TOKENS).await {
            Ok(text) => parse_sections(&text).unwrap_or_else(|| {
                warn!("⚠️ Respuesta del generador sin secciones válidas, usando texto estático");
                fallback_sections()
            }),
            Err(e) => {
                warn!("⚠️ Generación del exposé fallida, usando texto estático: {}", e);
                fallback_sections()
            }
        }
    }

    /// Descripción reescrita; la original si la llamada falla
    pub async fn improve_description(&self, vehicle: &VehicleRecord) -> Option<String> {
        let original = vehicle.description.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        let prompt = format!(
            "Verbessere die folgende Fahrzeugbeschreibung für ein hochwertiges Premium-Exposé. \
             Schreibe stilistisch ansprechend, klar und emotional, mit Fokus auf Qualität, \
             Exklusivität und Fahrgefühl. Maximal 120 Wörter. Antworte nur mit dem Text.\n\n\
             Fahrzeug: {} {} ({})\n\nOriginaltext:\n{}",
            vehicle.brand,
            vehicle.model,
            display_year(vehicle.year),
            original
        );

        match self.generator.generate(&prompt, DESCRIPTION_MAX_TOKENS).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => Some(original.to_string()),
            Err(e) => {
                warn!("⚠️ No se pudo mejorar la descripción: {}", e);
                Some(original.to_string())
            }
        }
    }

    /// Exposé HTML completo. Las URLs de imágenes ya deben estar resueltas.
    pub async fn render_html(&self, vehicle: &VehicleRecord) -> String {
        let sections = self.generate_sections(vehicle).await;
        let description = self.improve_description(vehicle).await;
        info!(
            "📰 Exposé para {} {}: {} secciones, {} imágenes",
            vehicle.brand,
            vehicle.model,
            sections.len(),
            vehicle.images.len()
        );
        build_expose_html(
            vehicle,
            &sections,
            description.as_deref(),
            &self.config,
            Utc::now().date_naive(),
        )
    }

    pub async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>> {
        self.renderer.render(html).await
    }
}

fn expose_prompt(vehicle: &VehicleRecord, dealer_name: &str) -> String {
    format!(
        "Du bist ein kreativer Texter und Autoverkäufer bei {dealer}. Schreibe ein emotionales, \
         exklusives Fahrzeug-Exposé im Stil eines hochwertigen Immobilienexposés für einen \
         {brand} {model} aus dem Jahr {year}. Jeder Abschnitt begleitet ein Fahrzeugbild \
         (Außenansicht, Design, Innenraum, Technik, Ausstattung) und der letzte Abschnitt \
         endet mit einem Aufruf zur Kontaktaufnahme.\n\n\
         TECHNISCHE DETAILS:\n\
         - Kilometerstand: {mileage} km\n\
         - Preis: {price} €\n\
         - Kraftstoff: {fuel}\n\
         - Leistung: {power}\n\
         - Getriebe: {transmission}\n\
         - Ausstattung: {features}\n\n\
         Antworte ausschließlich mit JSON in genau dieser Form, ohne Markdown und ohne HTML:\n\
         {{\"sections\":[{{\"heading\":\"Überschrift\",\"body\":\"Absatz\"}}]}}\n\
         Erzeuge zwischen vier und sechs Abschnitte.",
        dealer = dealer_name,
        brand = vehicle.brand,
        model = vehicle.model,
        year = display_year(vehicle.year),
        mileage = vehicle.mileage.map(|m| format_thousands(m.into())).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        price = vehicle.price.map(format_price).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        fuel = vehicle.fuel_type,
        power = vehicle.power.as_deref().unwrap_or(NOT_SPECIFIED),
        transmission = vehicle.transmission.as_deref().unwrap_or(NOT_SPECIFIED),
        features = vehicle.features.join(", "),
    )
}

/// Escapar texto para insertarlo en HTML (contenido y atributos)
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Separador de miles alemán: 85000 -> "85.000"
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Precio con formato alemán: 14990.50 -> "14.990,50", 14990.00 -> "14.990"
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp(2);
    let integer = rounded.trunc();
    let cents = ((rounded - integer).abs() * Decimal::ONE_HUNDRED).trunc();
    let integer_text = format_thousands(integer.to_i64().unwrap_or_default());

    if cents.is_zero() {
        integer_text
    } else {
        format!("{},{:0>2}", integer_text, cents.to_string())
    }
}

fn display_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn optional_text(value: Option<&str>) -> String {
    escape_html(value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_SPECIFIED))
}

/// Párrafos separados por líneas en blanco; saltos simples pasan a `<br>`
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Imagen que acompaña a la sección `index`; la primera ya está en la cabecera
pub fn section_image_index(index: usize, image_count: usize) -> Option<usize> {
    (image_count > 0).then(|| (index + 1).min(image_count - 1))
}

/// Imágenes que no caben en las secciones de contenido
pub fn gallery_images(images: &[String]) -> &[String] {
    &images[images.len().min(CONTENT_IMAGE_COUNT)..]
}

pub fn build_expose_html(
    vehicle: &VehicleRecord,
    sections: &[ExposeSection],
    description: Option<&str>,
    config: &ExposeConfig,
    generated_on: NaiveDate,
) -> String {
    let brand = escape_html(&vehicle.brand);
    let model = escape_html(&vehicle.model);
    let year = escape_html(&display_year(vehicle.year));
    let logo = escape_html(&config.logo_url);
    let dealer = escape_html(&config.dealer_name);
    let header_image = vehicle
        .images
        .first()
        .map(|url| escape_html(url))
        .unwrap_or_default();

    let specs = [
        ("Marke", brand.clone()),
        ("Modell", model.clone()),
        ("Baujahr", year.clone()),
        (
            "Kilometerstand",
            vehicle
                .mileage
                .map(|m| format!("{} km", format_thousands(m.into())))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        (
            "Preis",
            vehicle
                .price
                .map(|p| format!("{} €", format_price(p)))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        ("Kraftstoff", escape_html(&vehicle.fuel_type)),
        ("Getriebe", optional_text(vehicle.transmission.as_deref())),
        ("Leistung", optional_text(vehicle.power.as_deref())),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="spec-item"><div class="spec-label">{}</div><div class="spec-value">{}</div></div>"#,
            label, value
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let description_html = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            format!(
                r#"<div class="section description"><h2>Fahrzeugbeschreibung</h2><blockquote>{}</blockquote></div>"#,
                escape_html(d).replace('\n', "<br>")
            )
        })
        .unwrap_or_default();

    let sections_html = sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let heading = escape_html(&section.heading);
            let image = section_image_index(index, vehicle.images.len())
                .map(|i| {
                    format!(
                        r#"<div class="image-container"><img src="{}" alt="{}" /></div>"#,
                        escape_html(&vehicle.images[i]),
                        heading
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="section"><h2>{}</h2><div class="row{}"><div class="column expose-text">{}</div>{}</div></div>"#,
                heading,
                if index % 2 == 0 { "" } else { " row-reverse" },
                paragraphs(&section.body),
                image
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let features_html = if vehicle.features.is_empty() {
        "<p>Keine spezifischen Ausstattungsmerkmale angegeben</p>".to_string()
    } else {
        vehicle
            .features
            .iter()
            .map(|f| format!("<span>{}</span>", escape_html(f)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let gallery = gallery_images(&vehicle.images);
    let gallery_html = if gallery.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="section"><h2>Bildergalerie</h2><div class="gallery">{}</div></div>"#,
            gallery
                .iter()
                .map(|url| format!(r#"<img src="{}" alt="Fahrzeugdetail" class="gallery-image">"#, escape_html(url)))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{brand} {model} ({year}) - Exklusives Angebot</title>
<style>
body {{ font-family: 'Montserrat', Arial, sans-serif; margin: 0; color: #333; line-height: 1.7; }}
.container {{ max-width: 1200px; margin: 0 auto; }}
.header {{ position: relative; padding: 4rem 2rem; text-align: center; color: #fff; background-color: #1a365d; background-image: linear-gradient(135deg, rgba(0,0,0,0.7), rgba(0,0,0,0.3)), url('{header_image}'); background-size: cover; background-position: center; }}
.logo {{ max-width: 220px; margin-bottom: 1.5rem; }}
h1 {{ font-family: 'Playfair Display', serif; font-size: 3em; margin: 0; }}
h2 {{ font-family: 'Playfair Display', serif; color: #1a365d; text-align: center; border-bottom: 3px solid #c9a55c; padding-bottom: 1rem; }}
.specs {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1.5rem; padding: 2.5rem; background: #f8f9fa; }}
.spec-item {{ text-align: center; padding: 1rem; background: #fff; border-radius: 6px; }}
.spec-label {{ font-weight: 600; color: #1a365d; text-transform: uppercase; font-size: 0.9em; }}
.section {{ margin: 4rem 0; padding: 0 2rem; page-break-inside: avoid; }}
.description blockquote {{ font-style: italic; border-left: 4px solid #c9a55c; padding: 1.2em 2em; }}
.row {{ display: flex; align-items: center; gap: 3rem; }}
.row-reverse {{ flex-direction: row-reverse; }}
.column, .image-container {{ flex: 1; }}
.image-container img {{ width: 100%; border-radius: 8px; }}
.features {{ display: flex; flex-wrap: wrap; justify-content: center; gap: 0.8rem; }}
.features span {{ background: #f8f9fa; color: #1a365d; border: 1px solid rgba(0,0,0,0.1); border-radius: 30px; padding: 0.5rem 1.2rem; }}
.gallery {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }}
.gallery-image {{ width: 100%; height: 220px; object-fit: cover; border-radius: 8px; }}
.cta-section {{ text-align: center; padding: 5rem 2rem; background: #1a365d; color: #fff; }}
.cta-section h2 {{ color: #fff; }}
.footer {{ text-align: center; padding: 3rem 2rem; background: #f8f9fa; font-size: 0.9em; }}
.footer img {{ max-width: 150px; }}
</style>
</head>
<body>
<div class="container">
<div class="header">
<img src="{logo}" alt="{dealer} Logo" class="logo">
<h1>{brand} {model} ({year})</h1>
<p class="tagline">Ihr Schlüssel zu Eleganz und Dynamik</p>
</div>
<div class="section intro"><p>Wir präsentieren Ihnen diesen {brand} {model} aus dem Jahr {year}, ein Fahrzeug, das Performance und Stil vereint.</p></div>
<div class="section"><h2>Fahrzeugdetails</h2><div class="specs">
{specs}
</div></div>
{description_html}
{sections_html}
<div class="section"><h2>Ausstattungsmerkmale</h2><div class="features">
{features_html}
</div></div>
{gallery_html}
<div class="cta-section">
<h2>Erleben Sie dieses Fahrzeug persönlich</h2>
<p>Kontaktieren Sie uns noch heute für eine Probefahrt mit diesem {brand} {model}.</p>
<p>Tel: {phone}</p>
</div>
<div class="footer">
<img src="{logo}" alt="{dealer} Logo">
<p>© {current_year} {dealer} | Fahrzeug-ID: {id} | Erstellt am: {created}</p>
<p>Tel: {phone} | E-Mail: {email} | Adresse: {address}</p>
</div>
</div>
</body>
</html>"#,
        brand = brand,
        model = model,
        year = year,
        header_image = header_image,
        logo = logo,
        dealer = dealer,
        specs = specs,
        description_html = description_html,
        sections_html = sections_html,
        features_html = features_html,
        gallery_html = gallery_html,
        phone = escape_html(&config.dealer_phone),
        email = escape_html(&config.dealer_email),
        address = escape_html(&config.dealer_address),
        current_year = generated_on.year(),
        id = vehicle.id,
        created = generated_on.format("%d.%m.%Y"),
    )
}

/// Nombre del adjunto PDF, limitado a caracteres seguros para cabeceras
pub fn expose_filename(brand: &str, model: &str) -> String {
    let safe = |value: &str| -> String {
        value
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    };
    format!("fahrzeug_expose_{}_{}.pdf", safe(brand), safe(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pdf_service::PdfRenderer;
    use crate::services::text_generation_service::TextGenerator;
    use crate::utils::errors::AppError;
    use async_trait::async_trait;
    use std::str::FromStr;
    use std::sync::Arc;
    use uuid::Uuid;

    struct FixedGenerator(String);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> AppResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> AppResult<String> {
            Err(AppError::ExternalApi("down".into()))
        }
    }

    struct NoPdf;

    #[async_trait]
    impl PdfRenderer for NoPdf {
        async fn render(&self, _html: &str) -> AppResult<Vec<u8>> {
            Ok(b"%PDF-1.4".to_vec())
        }
    }

    fn vehicle(images: usize) -> VehicleRecord {
        VehicleRecord {
            id: Uuid::new_v4(),
            brand: "Mercedes-Benz".into(),
            model: "C <200>".into(),
            year: Some(2020),
            price: Decimal::from_str("32990.00").ok(),
            mileage: Some(45000),
            fuel_type: "Benzin".into(),
            transmission: Some("Automatik".into()),
            power: None,
            description: Some("Scheckheftgepflegt".into()),
            status: "available".into(),
            created_at: Utc::now(),
            features: vec!["Navi".into(), "Leder & Holz".into()],
            images: (0..images).map(|i| format!("https://cdn.example.com/{}.jpg", i)).collect(),
        }
    }

    fn service(generator: SharedTextGenerator) -> ExposeService {
        ExposeService::new(generator, Arc::new(NoPdf), ExposeConfig::default())
    }

    #[test]
    fn test_parse_sections_with_code_fence() {
        let text = "```json\n{\"sections\":[{\"heading\":\"Design\",\"body\":\"Elegant.\"},{\"heading\":\"\",\"body\":\"x\"}]}\n```";
        let sections = parse_sections(text).unwrap();
        assert_eq!(sections, vec![ExposeSection::new("Design", "Elegant.")]);
    }

    #[test]
    fn test_parse_sections_rejects_prose() {
        assert!(parse_sections("<h2>Design</h2> schön").is_none());
        assert!(parse_sections(r#"{"sections":[]}"#).is_none());
    }

    #[tokio::test]
    async fn test_failed_generation_uses_fallback() {
        let sections = service(Arc::new(FailingGenerator)).generate_sections(&vehicle(1)).await;
        assert_eq!(sections, fallback_sections());
        assert_eq!(sections.len(), 4);
    }

    #[tokio::test]
    async fn test_generated_sections_are_used() {
        let generator = FixedGenerator(r#"{"sections":[{"heading":"Auftritt","body":"Stark."}]}"#.into());
        let sections = service(Arc::new(generator)).generate_sections(&vehicle(1)).await;
        assert_eq!(sections[0].heading, "Auftritt");
    }

    #[tokio::test]
    async fn test_improve_description_falls_back_to_original() {
        let improved = service(Arc::new(FailingGenerator)).improve_description(&vehicle(0)).await;
        assert_eq!(improved.as_deref(), Some("Scheckheftgepflegt"));

        let mut without = vehicle(0);
        without.description = Some("   ".into());
        assert!(service(Arc::new(FailingGenerator)).improve_description(&without).await.is_none());
    }

    #[test]
    fn test_section_image_selection() {
        assert_eq!(section_image_index(0, 0), None);
        assert_eq!(section_image_index(0, 1), Some(0));
        assert_eq!(section_image_index(0, 3), Some(1));
        assert_eq!(section_image_index(5, 3), Some(2));
    }

    #[test]
    fn test_gallery_skips_first_five() {
        let images: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        assert_eq!(gallery_images(&images), &["5".to_string(), "6".to_string()]);
        assert!(gallery_images(&images[..3]).is_empty());
    }

    #[test]
    fn test_html_escapes_values() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let html = build_expose_html(&vehicle(7), &fallback_sections(), Some("a < b"), &ExposeConfig::default(), date);

        assert!(html.contains("C &lt;200&gt;"));
        assert!(!html.contains("C <200>"));
        assert!(html.contains("Leder &amp; Holz"));
        assert!(html.contains("a &lt; b"));
        assert!(html.contains("45.000 km"));
        assert!(html.contains("32.990 €"));
        assert!(html.contains("Bildergalerie"));
        assert!(html.contains("01.05.2024"));
    }

    #[test]
    fn test_html_without_features_or_images() {
        let mut record = vehicle(0);
        record.features.clear();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let html = build_expose_html(&record, &fallback_sections(), None, &ExposeConfig::default(), date);
        assert!(html.contains("Keine spezifischen Ausstattungsmerkmale"));
        assert!(!html.contains("Bildergalerie"));
        assert!(!html.contains("image-container\"><img"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_price(Decimal::from_str("14990.5").unwrap()), "14.990,50");
        assert_eq!(format_price(Decimal::from_str("14990.00").unwrap()), "14.990");
    }

    #[test]
    fn test_expose_filename_is_header_safe() {
        assert_eq!(expose_filename("VW", "Golf GTI"), "fahrzeug_expose_VW_Golf_GTI.pdf");
        assert_eq!(expose_filename("Škoda", "Octavia"), "fahrzeug_expose__koda_Octavia.pdf");
    }
}
