//! Costume catalogue: titles, icons, sounds and the built-in narrative poems.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Costume {
    Vampire,
    Witch,
    Zombie,
    Werewolf,
    Ghost,
}

impl Costume {
    pub const ALL: [Costume; 5] = [
        Costume::Vampire,
        Costume::Witch,
        Costume::Zombie,
        Costume::Werewolf,
        Costume::Ghost,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "vampire" => Some(Self::Vampire),
            "witch" => Some(Self::Witch),
            "zombie" => Some(Self::Zombie),
            "werewolf" => Some(Self::Werewolf),
            "ghost" => Some(Self::Ghost),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Vampire => "vampire",
            Self::Witch => "witch",
            Self::Zombie => "zombie",
            Self::Werewolf => "werewolf",
            Self::Ghost => "ghost",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Vampire => "Vampiro",
            Self::Witch => "Bruj@",
            Self::Zombie => "Zombie",
            Self::Werewolf => "Hombre Lobo",
            Self::Ghost => "Fantasma",
        }
    }

    pub fn icon_pair(self) -> [&'static str; 2] {
        match self {
            Self::Vampire => ["🦇", "🩸"],
            Self::Witch => ["🧙‍♀️", "✨"],
            Self::Zombie => ["🧟", "🧠"],
            Self::Werewolf => ["🐺", "🌕"],
            Self::Ghost => ["👻", "🕯️"],
        }
    }

    pub fn sound_file(self) -> String {
        format!("{}_sound.mp3", self.tag())
    }

    pub fn fallback_poem(self, display_name: &str) -> [String; 3] {
        let name = match display_name.trim() {
            "" => "tu sombra",
            name => name,
        };
        match self {
            Self::Vampire => [
                format!("{name}, entre espejos de medianoche, viste seda y colmillos en silencio, donde la luna guarda promesas rojas."),
                "En balcones de viento quieto, un susurro antiguo talla tu destino, y las rosas beben estrellas.".to_string(),
                "Camina tu elegancia en tinieblas nobles: nadie olvida la danza del eterno invitado.".to_string(),
            ],
            Self::Witch => [
                format!("{name} enciende círculos de bruma, trenza relámpagos morados y ríe con ojos de luciérnaga."),
                "El bosque inclina su corona: calderos de luna hierven historias y amuletos despiertan.".to_string(),
                "Tu hechizo viaja ligero: donde tocas, la noche aprende a cantar.".to_string(),
            ],
            Self::Zombie => [
                format!("Late un tambor en la tierra: {name} regresa con pasos verdes, memoria de polvo y brillo secreto."),
                "Entre grietas elegantes, la vida firma treguas: ojos de neón, belleza de frontera.".to_string(),
                "Camina tu calma de niebla: incluso el silencio quiere vivir otra vez.".to_string(),
            ],
            Self::Werewolf => [
                format!("Loba/lobo del alba, {name} aúlla letras de cobre; la noche responde con montañas y piel."),
                "La luna afila caminos: correr es orar, y cada árbol guarda tu nombre.".to_string(),
                "Tu instinto es brújula de fuego: donde miras, despierta el bosque.".to_string(),
            ],
            Self::Ghost => [
                format!("Como un suspiro que aprendió a caminar, {name} roza campanas de vapor y ventanas azules."),
                "Los pasillos beben neblina: tu risa es vela pequeña en océanos dormidos.".to_string(),
                "Cruzas paredes de recuerdo: al pasar, la noche se vuelve amable.".to_string(),
            ],
        }
    }
}

/// Poem lines for a tag: the supplied lines when there are any, otherwise the
/// built-in poem (ghost for unknown tags).
pub fn poem_lines(tag: &str, display_name: &str, supplied: &[String]) -> Vec<String> {
    if !supplied.is_empty() {
        return supplied.to_vec();
    }
    Costume::from_tag(tag)
        .unwrap_or(Costume::Ghost)
        .fallback_poem(display_name)
        .into()
}

pub fn narrative_title(tag: &str, display_name: &str) -> String {
    let costume = match Costume::from_tag(tag) {
        Some(costume) => costume.title().to_string(),
        None => capitalize(tag.trim()).unwrap_or_else(|| "Alter Ego".to_string()),
    };
    let name = match display_name.trim() {
        "" => "Sin nombre",
        name => name,
    };
    format!("Tu álter ego: {costume} — {name}")
}

fn capitalize(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Three poem rows with the icon alternating sides.
pub fn poem_markup(lines: &[String], tag: &str) -> String {
    let [lead, trail] = Costume::from_tag(tag).unwrap_or(Costume::Ghost).icon_pair();
    let line = |idx: usize| escape_html(lines.get(idx).map(String::as_str).unwrap_or(""));
    format!(
        concat!(
            r#"<div class="poem-line-row"><span class="poem-line-icon">{lead}</span><span class="poem-line-text">{l1}</span></div>"#,
            r#"<div class="poem-line-row right"><span class="poem-line-text">{l2}</span><span class="poem-line-icon">{trail}</span></div>"#,
            r#"<div class="poem-line-row"><span class="poem-line-icon">{lead}</span><span class="poem-line-text">{l3}</span></div>"#,
        ),
        lead = lead,
        trail = trail,
        l1 = line(0),
        l2 = line(1),
        l3 = line(2),
    )
}

/// Full brochure panel: title, poem rows and a round thumbnail.
pub fn brochure_markup(tag: &str, display_name: &str, image_src: &str, lines: &[String]) -> String {
    let src = if image_src.is_empty() { "#" } else { image_src };
    format!(
        concat!(
            r#"<h3 class="brochure-subtitle">{title}</h3>"#,
            r#"<div class="parchment-bg brochure">{poem}"#,
            r#"<div class="brochure-row"><div class="brochure-img left" aria-hidden="true" style="overflow:hidden;">"#,
            r#"<img src="{src}" alt="Imagen final" style="width:100%;height:100%;object-fit:cover;border-radius:50%;"/>"#,
            r#"</div><div class="brochure-text"><p></p></div></div></div>"#,
        ),
        title = escape_html(&narrative_title(tag, display_name)),
        poem = poem_markup(lines, tag),
        src = escape_html(src),
    )
}
