use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: default_skin(),
            opts: config.unwrap_or(RenderOptions { use_color: true }),
        }
    }

    /// Multi-line Markdown; rendered through the skin when colors are on,
    /// printed raw otherwise.
    pub fn print_block(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    /// `2024-06-14 - Friday, 14 Jun 2024`
    pub fn print_resolved(&self, iso: &str, display: &str) {
        let mut iso = iso.to_string();
        let mut display = display.to_string();
        if self.opts.use_color {
            iso = iso.with(Color::Cyan).to_string();
            display = display.with(Color::Yellow).to_string();
        }
        println!("{iso} - {display}");
    }
}

fn default_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Yellow);
    skin.bold.set_fg(Color::Cyan);
    skin.bullet.set_fg(Color::DarkCyan);
    skin.inline_code.set_fg(Color::Green);
    skin
}
