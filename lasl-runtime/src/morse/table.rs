//! 国际 Morse 码基础字符表。

/// 字符 → 点划表示（`.` 为点，`-` 为划）
pub const TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('&', ".-..."),
    ('\'', ".----."),
    ('@', ".--.-."),
    (')', "-.--.-"),
    ('(', "-.--."),
    (':', "---..."),
    (',', "--..--"),
    ('=', "-...-"),
    ('!', "-.-.--"),
    ('.', ".-.-.-"),
    ('-', "-....-"),
    ('×', "-..-"),
    ('%', "------..-.-----"),
    ('+', ".-.-."),
    ('"', ".-..-."),
    ('?', "..--.."),
    ('/', "-..-."),
];

/// 查询单个字符的点划表示
pub fn render(c: char) -> Option<&'static str> {
    TABLE.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}

/// 按字符逐个渲染，忽略表外字符，不插入分隔符
pub fn render_symbol(code: &str) -> String {
    code.chars().filter_map(render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(render('S'), Some("..."));
        assert_eq!(render('0'), Some("-----"));
        assert_eq!(render('×'), render('X'));
        assert_eq!(render('s'), None);
        assert_eq!(render('<'), None);
    }

    #[test]
    fn test_render_symbol() {
        assert_eq!(render_symbol("SOS"), "...---...");
        assert_eq!(render_symbol("QRL?"), "--.-.-..-....--..");
        assert_eq!(render_symbol(""), "");
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut keys: Vec<char> = TABLE.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TABLE.len());
    }
}
