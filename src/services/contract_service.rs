// src/services/contract_service.rs

use std::path::{Path, PathBuf};

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::PropertyRepository,
    models::property::{ContractData, PropertyOperation},
};

const FONT_FAMILY: &str = "Roboto";

#[derive(Clone)]
pub struct ContractService {
    property_repo: PropertyRepository,
    fonts_dir: PathBuf,
}

impl ContractService {
    pub fn new(property_repo: PropertyRepository, fonts_dir: PathBuf) -> Self {
        Self {
            property_repo,
            fonts_dir,
        }
    }

    pub async fn contract_data(&self, property_id: Uuid) -> Result<ContractData, AppError> {
        self.property_repo
            .contract_data(property_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Property))
    }

    pub async fn contract_pdf(&self, property_id: Uuid) -> Result<Vec<u8>, AppError> {
        let data = self.contract_data(property_id).await?;
        let fonts_dir = self.fonts_dir.clone();

        // genpdf é síncrono e pesado: fora das threads do runtime
        tokio::task::spawn_blocking(move || render_contract(&data, &fonts_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de geração do PDF: {}", e))?
    }
}

/// Referência impressa no QR code do contrato.
pub fn listing_reference(property_id: Uuid) -> String {
    format!("ARTECA-{}", property_id.simple()).to_uppercase()
}

pub fn render_contract(data: &ContractData, fonts_dir: &Path) -> Result<Vec<u8>, AppError> {
    // 1. Fontes
    if !fonts_dir.is_dir() {
        return Err(AppError::FontNotFound(fonts_dir.display().to_string()));
    }
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None)
        .map_err(|e| AppError::FontNotFound(format!("{}: {}", fonts_dir.display(), e)))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Contrato - {}", data.title));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // 2. Cabeçalho
    let kind = match data.operation {
        PropertyOperation::Venta => "VENTA",
        PropertyOperation::Alquiler => "ALQUILER",
    };
    let exclusivity = if data.is_exclusive { "EXCLUSIVA" } else { "NO EXCLUSIVA" };

    doc.push(
        elements::Paragraph::new("ARTECA INMOBILIARIA")
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1));
    doc.push(
        elements::Paragraph::new(format!("CONTRATO DE INTERMEDIACIÓN ({kind}, {exclusivity})"))
            .styled(style::Style::new().bold().with_font_size(13)),
    );
    doc.push(elements::Break::new(1.5));

    // 3. Partes e imóvel
    let mut table = elements::TableLayout::new(vec![1, 3]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let not_informed = "-".to_string();
    let rows = [
        ("Inmueble", data.title.clone()),
        ("Dirección", data.address.clone().unwrap_or_else(|| not_informed.clone())),
        ("Ciudad", data.city.clone()),
        ("Precio", format!("{} {:.2}", data.currency, data.price)),
        ("Comisión", format!("{:.2}%", data.commission_pct)),
        ("Propietario", data.owner_name.clone().unwrap_or_else(|| not_informed.clone())),
        ("DNI/RUC", data.owner_dni_ruc.clone().unwrap_or_else(|| not_informed.clone())),
        ("Agente", data.agent_name.clone()),
        ("Contacto agente", match &data.agent_phone {
            Some(phone) => format!("{} / {}", data.agent_email, phone),
            None => data.agent_email.clone(),
        }),
    ];

    let label_style = style::Style::new().bold();
    for (label, value) in rows {
        table
            .row()
            .element(elements::Paragraph::new(label).styled(label_style))
            .element(elements::Paragraph::new(value))
            .push()
            .map_err(|e| AppError::PdfError(e.to_string()))?;
    }
    doc.push(table);

    if let Some(description) = &data.description {
        doc.push(elements::Break::new(1.5));
        doc.push(elements::Paragraph::new(description.as_str()));
    }

    // 4. QR code com a referência do anúncio
    let reference = listing_reference(data.property_id);
    let code = QrCode::new(reference.as_bytes()).map_err(|e| AppError::PdfError(e.to_string()))?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let qr_image = elements::Image::from_dynamic_image(image::DynamicImage::ImageLuma8(image_buffer))
        .map_err(|e| AppError::PdfError(e.to_string()))?
        .with_scale(genpdf::Scale::new(0.5, 0.5));

    doc.push(elements::Break::new(2));
    doc.push(qr_image);
    doc.push(
        elements::Paragraph::new(reference).styled(style::Style::new().italic().with_font_size(8)),
    );

    // 5. Assinaturas
    doc.push(elements::Break::new(3));
    doc.push(elements::Paragraph::new("______________________          ______________________"));
    doc.push(elements::Paragraph::new("      Propietario                                 Agente"));

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    Ok(buffer)
}
