use serde::{Deserialize, Serialize};

/// サービスの列挙コード ⇔ 表示名の対応表を持つ列挙型を定義する
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// エラーメッセージ用の種別名
            pub const KIND: &'static str = $kind;

            /// 既知の値すべて（コード順）
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// ワイヤ上のコードから変換（未知のコードは None）
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// サービスの列挙名（表示用）
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                // 幅指定 ({:<15}) を効かせるため pad を使う
                f.pad(self.name())
            }
        }
    };
}

categorical! {
    /// 品詞タグ
    pub enum SpeechTag ("part-of-speech tag") {
        Unknown = 0 => "UNKNOWN",
        Adj = 1 => "ADJ",
        Adp = 2 => "ADP",
        Adv = 3 => "ADV",
        Conj = 4 => "CONJ",
        Det = 5 => "DET",
        Noun = 6 => "NOUN",
        Num = 7 => "NUM",
        Pron = 8 => "PRON",
        Prt = 9 => "PRT",
        Punct = 10 => "PUNCT",
        Verb = 11 => "VERB",
        X = 12 => "X",
        Affix = 13 => "AFFIX",
    }
}

categorical! {
    /// 態
    pub enum Voice ("voice") {
        Unknown = 0 => "VOICE_UNKNOWN",
        Active = 1 => "ACTIVE",
        Causative = 2 => "CAUSATIVE",
        Passive = 3 => "PASSIVE",
    }
}

categorical! {
    /// 時制
    pub enum Tense ("tense") {
        Unknown = 0 => "TENSE_UNKNOWN",
        Conditional = 1 => "CONDITIONAL_TENSE",
        Future = 2 => "FUTURE",
        Past = 3 => "PAST",
        Present = 4 => "PRESENT",
        Imperfect = 5 => "IMPERFECT",
        Pluperfect = 6 => "PLUPERFECT",
    }
}

categorical! {
    /// 係り受けラベル
    pub enum DependencyLabel ("dependency label") {
        Unknown = 0 => "UNKNOWN",
        Abbrev = 1 => "ABBREV",
        Acomp = 2 => "ACOMP",
        Advcl = 3 => "ADVCL",
        Advmod = 4 => "ADVMOD",
        Amod = 5 => "AMOD",
        Appos = 6 => "APPOS",
        Attr = 7 => "ATTR",
        Aux = 8 => "AUX",
        Auxpass = 9 => "AUXPASS",
        Cc = 10 => "CC",
        Ccomp = 11 => "CCOMP",
        Conj = 12 => "CONJ",
        Csubj = 13 => "CSUBJ",
        Csubjpass = 14 => "CSUBJPASS",
        Dep = 15 => "DEP",
        Det = 16 => "DET",
        Discourse = 17 => "DISCOURSE",
        Dobj = 18 => "DOBJ",
        Expl = 19 => "EXPL",
        Goeswith = 20 => "GOESWITH",
        Iobj = 21 => "IOBJ",
        Mark = 22 => "MARK",
        Mwe = 23 => "MWE",
        Mwv = 24 => "MWV",
        Neg = 25 => "NEG",
        Nn = 26 => "NN",
        Npadvmod = 27 => "NPADVMOD",
        Nsubj = 28 => "NSUBJ",
        Nsubjpass = 29 => "NSUBJPASS",
        Num = 30 => "NUM",
        Number = 31 => "NUMBER",
        P = 32 => "P",
        Parataxis = 33 => "PARATAXIS",
        Partmod = 34 => "PARTMOD",
        Pcomp = 35 => "PCOMP",
        Pobj = 36 => "POBJ",
        Poss = 37 => "POSS",
        Postneg = 38 => "POSTNEG",
        Precomp = 39 => "PRECOMP",
        Preconj = 40 => "PRECONJ",
        Predet = 41 => "PREDET",
        Pref = 42 => "PREF",
        Prep = 43 => "PREP",
        Pronl = 44 => "PRONL",
        Prt = 45 => "PRT",
        Ps = 46 => "PS",
        Quantmod = 47 => "QUANTMOD",
        Rcmod = 48 => "RCMOD",
        Rcmodrel = 49 => "RCMODREL",
        Rdrop = 50 => "RDROP",
        Ref = 51 => "REF",
        Remnant = 52 => "REMNANT",
        Reparandum = 53 => "REPARANDUM",
        Root = 54 => "ROOT",
        Snum = 55 => "SNUM",
        Suff = 56 => "SUFF",
        Tmod = 57 => "TMOD",
        Topic = 58 => "TOPIC",
        Vmod = 59 => "VMOD",
        Vocative = 60 => "VOCATIVE",
        Xcomp = 61 => "XCOMP",
        Suffix = 62 => "SUFFIX",
        Title = 63 => "TITLE",
        Advphmod = 64 => "ADVPHMOD",
        Auxcaus = 65 => "AUXCAUS",
        Auxvv = 66 => "AUXVV",
        Dtmod = 67 => "DTMOD",
        Foreign = 68 => "FOREIGN",
        Kw = 69 => "KW",
        List = 70 => "LIST",
        Nomc = 71 => "NOMC",
        Nomcsubj = 72 => "NOMCSUBJ",
        Nomcsubjpass = 73 => "NOMCSUBJPASS",
        Numc = 74 => "NUMC",
        Cop = 75 => "COP",
        Dislocated = 76 => "DISLOCATED",
        Asp = 77 => "ASP",
        Gmod = 78 => "GMOD",
        Gobj = 79 => "GOBJ",
        Infmod = 80 => "INFMOD",
        Mes = 81 => "MES",
        Ncomp = 82 => "NCOMP",
    }
}

/// 1トークン分の構文情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    /// 元テキスト中の開始位置（単位はリクエストのエンコーディングに依存）
    pub location: i32,
    pub speech_tag: SpeechTag,
    pub voice: Voice,
    pub tense: Tense,
    pub lemma: String,
    /// 係り先トークンの位置。ルートは自分自身を指す
    pub head_token_index: usize,
    pub label: DependencyLabel,
}

/// 解析結果（トークン順は元テキストの順）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tokens: Vec<TokenRecord>,
    pub language: String,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 指定トークンの係り先
    pub fn head_of(&self, index: usize) -> Option<&TokenRecord> {
        let token = self.tokens.get(index)?;
        self.tokens.get(token.head_token_index)
    }

    /// 係り先が自分自身のトークン（文ごとのルート）
    pub fn roots(&self) -> impl Iterator<Item = (usize, &TokenRecord)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(index, token)| token.head_token_index == *index)
    }
}
