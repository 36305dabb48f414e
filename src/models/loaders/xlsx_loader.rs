use crate::error::{AppResult, FormatError};
use crate::models::record::Record;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 从表格文件（xlsx / xls / ods）加载所有记录
///
/// 只读取第一个工作表。第一行是表头，列名不参与判断：
/// 第 1 列为序号，第 2 列为申请号。
pub async fn load_records(path: &Path) -> AppResult<Vec<Record>> {
    let display = path.display().to_string();
    let bytes = fs::read(path).await.map_err(|source| FormatError::Io {
        path: display.clone(),
        source,
    })?;

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| FormatError::Unreadable {
            path: display.clone(),
            source,
        })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FormatError::NoSheet {
            path: display.clone(),
        })?
        .map_err(|source| FormatError::Unreadable {
            path: display.clone(),
            source,
        })?;

    if range.is_empty() {
        return Err(FormatError::EmptySheet { path: display }.into());
    }

    let records = records_from_rows(range.rows())?;
    info!(
        "正在加载: {} (共 {} 条记录)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        records.len()
    );

    Ok(records)
}

/// 把表格行转换为记录，第一行视为表头
pub fn records_from_rows<'a, I>(rows: I) -> AppResult<Vec<Record>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();

    let header_width = rows.next().map(|header| header.len()).unwrap_or(0);
    if header_width < 2 {
        return Err(FormatError::MissingColumns {
            found: header_width,
        }
        .into());
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        // 表头占第 1 行
        let row_number = index + 2;
        let sequence_id = row.first().map(cell_text).unwrap_or_default();
        let application_number = row.get(1).map(cell_text).unwrap_or_default();

        if sequence_id.is_empty() && application_number.is_empty() {
            continue;
        }
        if application_number.is_empty() {
            warn!("第 {} 行没有申请号，已跳过", row_number);
            continue;
        }

        records.push(Record::new(sequence_id, &application_number));
    }

    Ok(records)
}

/// 单元格转文本，整数值的浮点数不带小数部分
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}
