#![allow(dead_code)]

use async_trait::async_trait;
use lopdf::{dictionary, Document, Object, Stream};
use patent_pdf_downloader::{AppError, AppResult, Config, HttpResponse, HttpTransport};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const REGISTRY_URL: &str = "http://registry.test/getAnnFullTextInfoSearch";
pub const SERVICE_KEY: &str = "test-service-key";

/// 测试用配置
pub fn test_config() -> Config {
    Config {
        registry_url: REGISTRY_URL.to_string(),
        service_key: Some(SERVICE_KEY.to_string()),
        input_file: Some(PathBuf::from("patents.xlsx")),
        ..Config::default()
    }
}

/// 一次被记录下来的请求
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

enum Route {
    Respond(HttpResponse),
    Unreachable,
}

/// 假的 HTTP 传输：按 URL（查询接口按申请号）返回预设响应，未注册的地址返回 404
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Route>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self, key: String, route: Route) {
        self.routes.lock().unwrap().insert(key, route);
    }

    fn registry_key(application_number: &str) -> String {
        format!("{}?applicationNumber={}", REGISTRY_URL, application_number)
    }

    /// 查询接口返回指向 `pdf_url` 的正常响应
    pub fn registry_path(&self, application_number: &str, pdf_url: &str) {
        self.registry_xml(application_number, &registry_xml_with_path(pdf_url));
    }

    /// 查询接口返回指定的 XML
    pub fn registry_xml(&self, application_number: &str, xml: &str) {
        self.route(
            Self::registry_key(application_number),
            Route::Respond(HttpResponse {
                status: 200,
                body: xml.as_bytes().to_vec(),
            }),
        );
    }

    /// 查询接口返回指定状态码
    pub fn registry_status(&self, application_number: &str, status: u16) {
        self.route(
            Self::registry_key(application_number),
            Route::Respond(HttpResponse {
                status,
                body: Vec::new(),
            }),
        );
    }

    /// 文档地址返回指定内容
    pub fn document(&self, url: &str, bytes: Vec<u8>) {
        self.route(
            url.to_string(),
            Route::Respond(HttpResponse { status: 200, body: bytes }),
        );
    }

    /// 文档地址返回指定状态码
    pub fn document_status(&self, url: &str, status: u16) {
        self.route(
            url.to_string(),
            Route::Respond(HttpResponse {
                status,
                body: b"<html>error</html>".to_vec(),
            }),
        );
    }

    /// 文档地址无法连接
    pub fn document_unreachable(&self, url: &str) {
        self.route(url.to_string(), Route::Unreachable);
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> AppResult<HttpResponse> {
        self.sent.lock().unwrap().push(SentRequest {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout,
        });

        let key = match query.iter().find(|(k, _)| *k == "applicationNumber") {
            Some((_, number)) => format!("{}?applicationNumber={}", url, number),
            None => url.to_string(),
        };

        match self.routes.lock().unwrap().get(&key) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::Unreachable) => Err(AppError::request_failed(
                url,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
            None => Ok(HttpResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

/// KIPRIS 风格的正常响应
pub fn registry_xml_with_path(pdf_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<response>
  <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
  <body><item><docName>full.pdf</docName><path>{}</path></item></body>
</response>"#,
        pdf_url
    )
}

/// 没有 path 元素的响应
pub fn registry_xml_without_path() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
  <body><items/></body>
</response>"#
        .to_string()
}

/// 生成指定页数的 PDF
pub fn build_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for number in 1..=page_count {
        let content = format!("BT 72 720 Td (Page {}) Tj ET", number).into_bytes();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("生成测试 PDF 失败");
    bytes
}

/// PDF 的页数
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .expect("应为合法 PDF")
        .get_pages()
        .len()
}

/// 读取 zip 中所有条目（按名称排序）
pub fn read_archive(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    use std::io::Read;

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).expect("应为合法 zip");
    let mut entries = Vec::new();
    for i in 0..zip.len() {
        let mut file = zip.by_index(i).expect("读取条目失败");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("读取内容失败");
        entries.push((file.name().to_string(), content));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

/// 生成只有一个工作表的最小 xlsx（全部单元格为内联字符串）
pub fn build_xlsx(rows: &[&[&str]]) -> Vec<u8> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            let column = (b'A' + c as u8) as char;
            sheet.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                column,
                r + 1,
                value
            ));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let files = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        writer
            .start_file(name, SimpleFileOptions::default())
            .expect("写入 xlsx 条目失败");
        writer.write_all(content.as_bytes()).expect("写入 xlsx 内容失败");
    }
    writer.finish().expect("完成 xlsx 失败").into_inner()
}
