// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::LazyLock;

/// Idioma usado quando o cliente não manda Accept-Language ou pede um que não temos.
pub const DEFAULT_LANG: &str = "es";

const ES: &[(&str, &str)] = &[
    ("validation_error", "Uno o más campos son inválidos."),
    ("missing_parameter", "Falta {param}"),
    ("invalid_parameter", "Parámetro inválido: {param}"),
    ("invalid_body", "El cuerpo de la solicitud no es un JSON válido"),
    ("invalid_credentials", "Credenciales inválidas"),
    ("invalid_token", "Token de autenticación inválido o ausente."),
    ("forbidden", "No tiene permisos para realizar esta acción."),
    ("not_found.user", "Usuario no encontrado"),
    ("not_found.property", "Propiedad no encontrada"),
    ("not_found.client", "Cliente no encontrado"),
    ("not_found.document", "Documento no encontrado"),
    ("not_found.sale", "Venta no encontrada"),
    ("not_found.post", "Publicación no encontrada"),
    ("client_has_properties", "No se puede borrar: el cliente tiene propiedades asociadas"),
    ("sale_already_approved", "La venta ya fue aprobada"),
    ("status_locked", "El estado de la propiedad no puede cambiarse manualmente a VENDIDO ni desde VENDIDO"),
    ("invalid_reference", "Referencia inválida: {param}"),
    ("email_exists", "Este e-mail ya está en uso."),
    ("db_connection", "No se pudo conectar a la base de datos"),
    ("db_statement", "Error al ejecutar la operación en la base de datos"),
    ("internal", "Ocurrió un error inesperado."),
    ("font_not_found", "No se encontraron las fuentes para generar el PDF"),
    ("pdf_render", "No se pudo generar el PDF"),
    ("msg.login_ok", "Login exitoso"),
    ("msg.user_updated", "Usuario actualizado"),
    ("msg.user_deactivated", "Usuario desactivado"),
    ("msg.property_updated", "Propiedad actualizada"),
    ("msg.property_deleted", "Propiedad eliminada"),
    ("msg.document_deleted", "Documento eliminado"),
    ("msg.client_updated", "Cliente actualizado"),
    ("msg.client_deleted", "Cliente eliminado"),
    ("msg.post_deleted", "Publicación eliminada"),
    ("msg.sale_approved", "Venta aprobada"),
    ("msg.published", "Publicación registrada"),
];

const PT: &[(&str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos."),
    ("missing_parameter", "Falta {param}"),
    ("invalid_parameter", "Parâmetro inválido: {param}"),
    ("invalid_body", "O corpo da requisição não é um JSON válido"),
    ("invalid_credentials", "E-mail ou senha inválidos."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("forbidden", "Você não tem permissão para realizar esta ação."),
    ("not_found.user", "Usuário não encontrado"),
    ("not_found.property", "Imóvel não encontrado"),
    ("not_found.client", "Cliente não encontrado"),
    ("not_found.document", "Documento não encontrado"),
    ("not_found.sale", "Venda não encontrada"),
    ("not_found.post", "Publicação não encontrada"),
    ("client_has_properties", "Não é possível apagar: o cliente possui imóveis associados"),
    ("sale_already_approved", "A venda já foi aprovada"),
    ("status_locked", "O status do imóvel não pode ser alterado manualmente para VENDIDO nem a partir de VENDIDO"),
    ("invalid_reference", "Referência inválida: {param}"),
    ("email_exists", "Este e-mail já está em uso."),
    ("db_connection", "Não foi possível conectar ao banco de dados"),
    ("db_statement", "Erro ao executar a operação no banco de dados"),
    ("internal", "Ocorreu um erro inesperado."),
    ("font_not_found", "Fontes para gerar o PDF não encontradas"),
    ("pdf_render", "Não foi possível gerar o PDF"),
    ("msg.login_ok", "Login realizado com sucesso"),
    ("msg.user_updated", "Usuário atualizado"),
    ("msg.user_deactivated", "Usuário desativado"),
    ("msg.property_updated", "Imóvel atualizado"),
    ("msg.property_deleted", "Imóvel apagado"),
    ("msg.document_deleted", "Documento apagado"),
    ("msg.client_updated", "Cliente atualizado"),
    ("msg.client_deleted", "Cliente apagado"),
    ("msg.post_deleted", "Publicação apagada"),
    ("msg.sale_approved", "Venda aprovada"),
    ("msg.published", "Publicação registrada"),
];

const EN: &[(&str, &str)] = &[
    ("validation_error", "One or more fields are invalid."),
    ("missing_parameter", "Missing {param}"),
    ("invalid_parameter", "Invalid parameter: {param}"),
    ("invalid_body", "The request body is not valid JSON"),
    ("invalid_credentials", "Invalid credentials"),
    ("invalid_token", "Missing or invalid authentication token."),
    ("forbidden", "You are not allowed to perform this action."),
    ("not_found.user", "User not found"),
    ("not_found.property", "Property not found"),
    ("not_found.client", "Client not found"),
    ("not_found.document", "Document not found"),
    ("not_found.sale", "Sale not found"),
    ("not_found.post", "Post not found"),
    ("client_has_properties", "Cannot delete: the client owns properties"),
    ("sale_already_approved", "The sale is already approved"),
    ("status_locked", "Property status cannot be set to VENDIDO manually nor changed once VENDIDO"),
    ("invalid_reference", "Invalid reference: {param}"),
    ("email_exists", "This e-mail is already in use."),
    ("db_connection", "Could not connect to the database"),
    ("db_statement", "Database operation failed"),
    ("internal", "An unexpected error occurred."),
    ("font_not_found", "Fonts for PDF generation were not found"),
    ("pdf_render", "Could not render the PDF"),
    ("msg.login_ok", "Login successful"),
    ("msg.user_updated", "User updated"),
    ("msg.user_deactivated", "User deactivated"),
    ("msg.property_updated", "Property updated"),
    ("msg.property_deleted", "Property deleted"),
    ("msg.document_deleted", "Document deleted"),
    ("msg.client_updated", "Client updated"),
    ("msg.client_deleted", "Client deleted"),
    ("msg.post_deleted", "Post deleted"),
    ("msg.sale_approved", "Sale approved"),
    ("msg.published", "Publication logged"),
];

static SHARED: LazyLock<I18nStore> = LazyLock::new(I18nStore::builtin);

/// Catálogo de mensagens por idioma.
#[derive(Debug)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn builtin() -> Self {
        let catalogs = [("es", ES), ("pt", PT), ("en", EN)]
            .into_iter()
            .map(|(lang, entries)| (lang, entries.iter().copied().collect()))
            .collect();

        Self { catalogs }
    }

    /// Instância global, usada quando não temos acesso ao AppState (rejeições de extratores).
    pub fn shared() -> &'static I18nStore {
        &SHARED
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key).to_string()
    }

    pub fn translate_with(&self, lang: &str, key: &str, param: &str) -> String {
        self.lookup(lang, key).replace("{param}", param)
    }

    fn lookup<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LANG)
                    .and_then(|catalog| catalog.get(key))
            })
            .copied()
            .unwrap_or(key)
    }
}
