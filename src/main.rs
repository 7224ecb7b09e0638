use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac::config::GuiConfig;
use tictac::error::GuiError;
use tictac::i18n::MessageKey;
use tictac::models::{Board, Coord, Player, WINNING_LINES, WinningFields};
use tictac::storage;
use tictac::ui::{Gui, Surface, TerminalSurface, UiEvent};

/// 终端井字棋（双人轮流）
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/tictac/config.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.or_else(storage::default_config_path);
    let config = match &config_path {
        Some(path) => GuiConfig::load_or_default(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GuiConfig::default(),
    };

    let log_path = init_logging(&config)?;
    info!(
        log = %log_path.display(),
        config = ?config_path.as_deref().filter(|p| p.exists()),
        "starting"
    );

    let catalog = config.catalog().context("failed to load translations")?;

    // 设置终端
    let surface = TerminalSurface::open(&config).context("failed to open terminal")?;
    let mut gui = Gui::new(surface, catalog)?;

    // 主循环
    let result = run_game(&mut gui, config.demo.show_hints);

    // 恢复终端
    gui.close()?;
    result?;

    info!("bye");
    Ok(())
}

/// 日志写入文件，终端被界面占用
fn init_logging(config: &GuiConfig) -> anyhow::Result<PathBuf> {
    let path = match &config.log.file {
        Some(path) => path.clone(),
        None => storage::data_dir()?.join(format!("tictac-{}.log", Local::now().format("%Y-%m-%d"))),
    };
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn open_log(path: &Path) -> anyhow::Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// 双人轮流下棋，窗口关闭时返回
fn run_game<S: Surface>(gui: &mut Gui<S>, show_hints: bool) -> Result<(), GuiError> {
    let mut scores = [0u32; 2];
    gui.show_player_icon(Player::X)?;
    gui.show_player_icon(Player::O)?;
    gui.show_scores(scores)?;

    let mut starter = Player::X;
    loop {
        let mut board = Board::new();
        let mut player = starter;
        gui.show_new_game()?;
        gui.render_board(&board, None)?;
        gui.show_turn(player)?;

        loop {
            let coord = match gui.listen_input()? {
                UiEvent::Close => return Ok(()),
                UiEvent::Click(coord) => coord,
            };
            if !board.place(coord, player) {
                gui.warn(MessageKey::InvalidMove.into())?;
                continue;
            }
            gui.render_board(&board, None)?;

            if let Some((winner, fields)) = board.winner() {
                scores[winner.slot()] += 1;
                info!(winner = %winner.symbol(), ?scores, "game won");
                gui.show_final_state(&board, Some(winner), &fields)?;
                gui.show_scores(scores)?;
                break;
            }
            if board.is_full() {
                info!(?scores, "game drawn");
                gui.show_final_state(&board, None, &WinningFields::new())?;
                break;
            }

            player = player.other();
            gui.show_turn(player)?;
            if show_hints {
                gui.show_policy(&hint_values(&board, player))?;
            }
        }

        // 任意点击开始下一局
        if gui.listen_input()? == UiEvent::Close {
            return Ok(());
        }
        starter = starter.other();
    }
}

/// 提示用的简单评估：经过该格且没有对手棋子的连线数，已占用的格子没有评估值
fn hint_values(board: &Board, player: Player) -> [f64; 9] {
    let opponent = player.other().to_cell();
    let mut values = [0.0; 9];
    for coord in Coord::all() {
        let index = coord.index();
        if !board.get(coord).is_empty() {
            values[index] = f64::NAN;
            continue;
        }
        values[index] = WINNING_LINES
            .iter()
            .filter(|line| line.contains(&index))
            .filter(|line| {
                line.iter().all(|&i| {
                    Coord::from_index(i).is_ok_and(|c| board.get(c) != opponent)
                })
            })
            .count() as f64;
    }
    values
}
