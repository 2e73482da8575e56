use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::domain::change::DiffSummary;
use crate::domain::message::{CommitMessage, clean_response};
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_PROMPT: &str = r#"Sen deneyimli bir yazılımcısın. Sana verilen git diff çıktısını analiz edip Conventional Commits v1.0.0 spesifikasyonuna tam uyumlu bir commit mesajı üreteceksin. Mesaj, bir insan geliştiricinin elle yazacağı gibi doğal ve anlaşılır olmalı.

MESAJ YAPISI:

<tip>[isteğe bağlı kapsam][isteğe bağlı !]: <açıklama>

[isteğe bağlı mesaj metni]

[isteğe bağlı alt metin(ler)]

TİP SEÇİMİ (tip her zaman İngilizce ve küçük harf):
- feat: Yeni özellik, fonksiyon, sınıf, dosya ekleme
- fix: Hata düzeltme, null check, validation düzeltme, crash çözme
- docs: README, .md dosyası, yorum satırı değişikliği
- style: Whitespace, format, CSS/SCSS — kod davranışı değişmez
- refactor: Kod yapısı değişikliği, rename, extract method — davranış değişmez
- perf: Performans iyileştirme, sorgu optimizasyonu, cache ekleme
- test: Test dosyası ekleme veya güncelleme
- build: Build sistemi, bağımlılık değişikliği
- ci: CI/CD dosyası değişikliği
- chore: Sabit değer değişikliği, config güncelleme, küçük bakım işleri
- revert: Önceki bir commit'i geri alma

KAPSAM KURALLARI:
- Kapsam İngilizce kalacak, parantez içinde yazılacak (örn: fix(parser):)
- Kodun hangi bölümünün değiştiğini açıklayan bir isim olMALI
- Tek dosya değiştiyse: dosyanın bulunduğu modül veya klasör adı
- Farklı modüllerdeyse: en anlamlı modül adı veya kapsam belirtme
- Kapsam zorunlu değil — emin değilsen belirtme

AÇIKLAMA KURALLARI:
- Açıklama MUTLAKA TÜRKÇE yazılacak
- Türkçe emir kipi kullan: ekle, düzelt, güncelle, kaldır, iyileştir
- Kısa ve öz ama anlaşılır ol — kesilmiş veya eksik kelime OLMAMALI
- Birden fazla dosya: değişikliklerin ortak amacını özetle

MESAJ METNİ (BODY) KURALLARI:
- Diff karmaşıksa açıklamadan sonra bir boş satır bırakıp Türkçe detay ekle
- Önemli değişiklikleri "- " ile listele
- Basit, tek amaçlı değişikliklerde mesaj metni ekleme

KÖKLÜ DEĞİŞİKLİK (BREAKING CHANGE):
- Geriye dönük uyumluluğu bozan değişiklik varsa tip/kapsam sonuna ! ekle
  veya alt metinde büyük harflerle BREAKING CHANGE: ile belirt

ÇIKTI KURALLARI:
- Sadece commit mesajını döndür, başka hiçbir şey yazma
- Açıklama, yorum, markdown, backtick, tırnak işareti KULLANMA

ÖRNEKLER:

feat(auth): kullanıcı giriş ekranı eklendi

fix(api): token yenileme sırasında oluşan null pointer hatası düzeltildi

docs: CHANGELOG'daki yazım hataları düzeltildi

chore: proje bağımlılıkları ve yapılandırma dosyaları güncellendi

- paket sürümleri yükseltildi
- eslint kuralları düzenlendi

feat(api)!: müşteriye ürünü kargolandığında mail atma özelliği eklendi"#;

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String, max_output_tokens: u32) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            max_output_tokens,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Configuration("Gemini API key not configured".to_string()))
    }

    fn generate_endpoint(&self, api_key: &str) -> String {
        format!(
            "{GEMINI_BASE_URL}/{}:generateContent?key={api_key}",
            self.model
        )
    }

    fn extract_message(payload: GenerateContentResponse) -> AppResult<String> {
        if let Some(error) = payload.error {
            return Err(AppError::LanguageModel(format!(
                "Gemini API error (code {}): {}",
                error.code, error.message
            )));
        }

        payload
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().flatten().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::LanguageModel("Gemini response contained no commit message".to_string())
            })
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn generate_commit_message(&self, changes: &DiffSummary) -> AppResult<CommitMessage> {
        let api_key = self.api_key()?;
        let request_body =
            GenerateContentRequest::new(&changes.diff, &changes.stat, self.max_output_tokens);

        let response = self
            .http
            .post(self.generate_endpoint(api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to reach Gemini: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|payload| payload.error)
                .map(|error| error.message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(AppError::LanguageModel(format!(
                "Gemini responded with {status}: {detail}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Gemini response: {err}"))
        })?;

        let raw = Self::extract_message(payload)?;
        Ok(CommitMessage(clean_response(&raw)))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn new(diff: &str, stat: &str, max_output_tokens: u32) -> Self {
        Self {
            system_instruction: SystemInstruction {
                parts: vec![RequestPart {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: format!("GIT DIFF STAT:\n{stat}\n\nGIT DIFF:\n{diff}"),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                max_output_tokens,
                top_p: 0.8,
                top_k: 40,
            },
        }
    }
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<ResponseCandidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}
