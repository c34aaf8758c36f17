//! PubMed source implementation using the E-utilities API.

use async_trait::async_trait;
use serde::Deserialize;

use super::xml::{split_elements, XmlElement};
use super::{RecordError, Source, SourceError};
use crate::config::PubMedConfig;
use crate::models::{ArticleRecord, AuthorEntry, FetchedRecord, SearchResult};
use crate::utils::HttpClient;

/// Maximum number of identifiers requested from `esearch`
pub const MAX_SEARCH_RESULTS: usize = 100;

/// PubMed research source
///
/// One `esearch` call (JSON) for identifiers, one `efetch` call (XML) for the
/// records. Nothing is retried.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: HttpClient,
    base_url: String,
    database: String,
}

impl PubMedSource {
    /// Create a new PubMed source from endpoint settings
    pub fn new(config: &PubMedConfig) -> Result<Self, SourceError> {
        Ok(Self::with_client(
            HttpClient::with_user_agent(&config.user_agent)?,
            config,
        ))
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: HttpClient, config: &PubMedConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
        }
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, query: &str) -> String {
        let params = [
            ("db", self.database.clone()),
            ("term", query.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", MAX_SEARCH_RESULTS.to_string()),
        ];

        format!(
            "{}/esearch.fcgi?{}",
            self.base_url,
            params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        )
    }

    /// Build E-utilities fetch URL for specific PubMed IDs
    fn build_fetch_url(&self, ids: &[String]) -> String {
        format!(
            "{}/efetch.fcgi?db={}&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(&self.database),
            urlencoding::encode(&ids.join(","))
        )
    }

    /// Parse E-utilities search response JSON
    fn parse_search_response(json: &str) -> Result<SearchResult, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResponse {
            esearchresult: ESearchResult,
        }

        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(default)]
            idlist: Vec<String>,
        }

        let response: ESearchResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e)))?;

        Ok(SearchResult::new(response.esearchresult.idlist))
    }

    /// Parse E-utilities fetch response XML, one entry per `PubmedArticle`
    fn parse_fetch_response(xml: &str) -> Result<Vec<FetchedRecord>, SourceError> {
        let articles = split_elements(xml, "PubmedArticle")?;

        Ok(articles
            .into_iter()
            .map(|raw| XmlElement::parse(raw).and_then(|article| parse_article(&article)))
            .collect())
    }
}

/// Convert one `PubmedArticle` element into an [`ArticleRecord`].
///
/// Lookups take the first matching descendant, so the PMID is the citation's own
/// and not one from a comments/corrections block further down.
fn parse_article(article: &XmlElement) -> Result<ArticleRecord, RecordError> {
    let citation = article
        .child("MedlineCitation")
        .ok_or(RecordError::MissingElement("MedlineCitation"))?;

    let pmid = citation.descendant("PMID").map(XmlElement::text);
    let title = citation.descendant("ArticleTitle").map(XmlElement::text);
    let year = citation
        .descendants("PubDate")
        .into_iter()
        .find_map(|date| date.child("Year"))
        .map(XmlElement::text);

    let authors = citation
        .descendants("Author")
        .into_iter()
        .map(|author| AuthorEntry {
            fore_name: author.child("ForeName").map(XmlElement::text),
            last_name: author.child("LastName").map(XmlElement::text),
            affiliation: author
                .find("AffiliationInfo/Affiliation")
                .map(XmlElement::text),
        })
        .collect();

    Ok(ArticleRecord {
        pmid,
        title,
        year,
        authors,
    })
}

#[async_trait]
impl Source for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search(&self, query: &str) -> Result<SearchResult, SourceError> {
        tracing::info!("Searching PubMed with query: {}", query);

        let url = self.build_search_url(query);
        let json = self.client.get_text(&url).await?;
        let result = Self::parse_search_response(&json)?;

        tracing::debug!("PubMed search returned {} ids", result.len());
        Ok(result)
    }

    async fn fetch(&self, ids: &[String]) -> Result<Vec<FetchedRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!("Fetching details for {} PubMed IDs", ids.len());

        let url = self.build_fetch_url(ids);
        let xml = self.client.get_text(&url).await?;
        let records = Self::parse_fetch_response(&xml)?;

        tracing::debug!("PubMed fetch returned {} articles", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PubMedSource {
        PubMedSource::new(&PubMedConfig::default()).unwrap()
    }

    const FETCH_XML: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">38000001</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2023</Year><Month>Nov</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Antibody design with <i>in silico</i> screening.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Doe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo>
              <Affiliation>Genentech Inc., South San Francisco, CA. jane.doe@gene.com</Affiliation>
            </AffiliationInfo>
            <AffiliationInfo>
              <Affiliation>Stanford University, Stanford, CA.</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Consortium</LastName>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
    <PubmedData>
      <ArticleIdList><ArticleId IdType="pubmed">38000001</ArticleId></ArticleIdList>
    </PubmedData>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>38000002</PMID>
      <Article>
        <Journal><JournalIssue><PubDate><MedlineDate>2023 Winter</MedlineDate></PubDate></JournalIssue></Journal>
        <ArticleTitle>Broken &unknownentity; title</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <PubmedData/>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn test_build_search_url() {
        let url = source().build_search_url("machine learning");

        assert!(url.starts_with("https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi?"));
        assert!(url.contains("db=pubmed"));
        assert!(url.contains("term=machine%20learning"));
        assert!(url.contains("retmax=100"));
        assert!(url.contains("retmode=json"));
    }

    #[test]
    fn test_build_fetch_url() {
        let ids = vec!["111".to_string(), "222".to_string()];
        let url = source().build_fetch_url(&ids);

        assert_eq!(
            url,
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?db=pubmed&id=111%2C222&retmode=xml"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = PubMedConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..Default::default()
        };
        let source = PubMedSource::new(&config).unwrap();
        assert!(source
            .build_search_url("x")
            .starts_with("http://localhost:1234/esearch.fcgi?"));
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{"header":{"type":"esearch"},"esearchresult":{"count":"2","idlist":["111","222"]}}"#;
        let result = PubMedSource::parse_search_response(json).unwrap();
        assert_eq!(result.ids, vec!["111", "222"]);
    }

    #[test]
    fn test_parse_search_response_without_idlist() {
        let json = r#"{"esearchresult":{"count":"0","ERROR":"Empty term and query_key - nothing todo"}}"#;
        let result = PubMedSource::parse_search_response(json).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_search_response_malformed() {
        assert!(matches!(
            PubMedSource::parse_search_response("<html>"),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            PubMedSource::parse_search_response(r#"{"error":"API rate limit exceeded"}"#),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_fetch_response() {
        let records = PubMedSource::parse_fetch_response(FETCH_XML).unwrap();
        assert_eq!(records.len(), 3);

        let first = records[0].as_ref().unwrap();
        assert_eq!(first.pmid.as_deref(), Some("38000001"));
        assert_eq!(
            first.title.as_deref(),
            Some("Antibody design with in silico screening.")
        );
        assert_eq!(first.year.as_deref(), Some("2023"));
        assert_eq!(first.authors.len(), 2);
        assert_eq!(first.authors[0].display_name(), "Jane Doe");
        assert_eq!(
            first.authors[0].affiliation.as_deref(),
            Some("Genentech Inc., South San Francisco, CA. jane.doe@gene.com")
        );
        assert_eq!(first.authors[1].display_name(), "Consortium");
        assert_eq!(first.authors[1].affiliation, None);

        assert!(matches!(records[1], Err(RecordError::Xml(_))));
        assert_eq!(
            records[2],
            Err(RecordError::MissingElement("MedlineCitation"))
        );
    }

    #[test]
    fn test_parse_article_without_year() {
        let xml = "<PubmedArticle><MedlineCitation><PMID>5</PMID><Article>\
                   <Journal><JournalIssue><PubDate><MedlineDate>1998 Dec-1999 Jan</MedlineDate></PubDate></JournalIssue></Journal>\
                   </Article></MedlineCitation></PubmedArticle>";
        let article = XmlElement::parse(xml).unwrap();
        let record = parse_article(&article).unwrap();

        assert_eq!(record.pmid.as_deref(), Some("5"));
        assert_eq!(record.title, None);
        assert_eq!(record.year, None);
        assert!(record.authors.is_empty());
    }

    #[test]
    fn test_parse_fetch_response_rejects_garbage() {
        assert!(PubMedSource::parse_fetch_response("Bad Gateway").is_err());
    }

    #[test]
    fn test_parse_fetch_response_rejects_truncated_body() {
        let cut = FETCH_XML.find("</PubmedArticleSet>").unwrap();
        let result = PubMedSource::parse_fetch_response(&FETCH_XML[..cut]);
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_source_identity() {
        let source = PubMedSource::new(&PubMedConfig::default()).unwrap();
        assert_eq!(source.id(), "pubmed");
        assert_eq!(source.name(), "PubMed");
    }

    #[tokio::test]
    async fn test_fetch_empty_ids_skips_network() {
        let config = PubMedConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let source = PubMedSource::new(&config).unwrap();
        let records = source.fetch(&[]).await.unwrap();
        assert!(records.is_empty());
    }
}
