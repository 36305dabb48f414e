use anyhow::Result;
use clap::Parser;
use patent_pdf_downloader::{logger, App, Config};
use std::path::PathBuf;

/// 专利公告全文 PDF 批量下载
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 输入表格（第 1 列序号，第 2 列申请号）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// KIPRIS API 服务密钥
    #[arg(short = 'k', long, env = "KIPRIS_SERVICE_KEY", hide_env_values = true)]
    service_key: Option<String>,

    /// 压缩包输出目录
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// 每份 PDF 保留的页数
    #[arg(short, long)]
    page_limit: Option<u32>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行参数优先于配置文件和环境变量
    fn apply(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input_file = Some(input);
        }
        if let Some(key) = self.service_key {
            config.service_key = Some(key);
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(limit) = self.page_limit {
            config.page_limit = limit;
        }
        config.verbose_logging |= self.verbose;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config)?.run().await?;

    if summary.success_count == 0 && summary.total > 0 {
        std::process::exit(2);
    }

    Ok(())
}
