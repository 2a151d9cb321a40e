// Prompt constants and builders for the AI services. The product targets
// Brazilian Portuguese resumes, so prompts and model output stay in pt-BR.

/// System instruction for the rewrite service.
pub const ENHANCE_SYSTEM: &str = "Você é um especialista em RH que cria currículos. \
    Sua tarefa é reescrever o texto fornecido para ser mais profissional e impactante. \
    Responda apenas com o texto reescrito, sem introduções ou comentários.";

/// Prompt for the skill-suggestion service.
pub fn suggest_skills_prompt(job_title: &str, experience: &str) -> String {
    format!(
        "Com base no cargo de \"{job_title}\" e na seguinte descrição de experiência \
         profissional: \"{experience}\", sugira uma lista de 8 habilidades e competências \
         relevantes (incluindo técnicas e comportamentais). Retorne apenas a lista de \
         habilidades, separadas por vírgula. Exemplo: Liderança, Comunicação, React, \
         Gestão de Projetos, Proatividade, Git, Scrum, Trabalho em Equipe"
    )
}

/// Prompt for extracting work history from a Carteira de Trabalho Digital PDF.
pub fn extract_work_history_prompt(full_text: &str) -> String {
    format!(
        "Analise o seguinte texto extraído de um PDF da Carteira de Trabalho Digital e \
         extraia todas as experiências profissionais listadas. Para cada experiência, \
         extraia: nome da empresa (empregador), cargo (ocupação), local (município do \
         estabelecimento), data de início (admissão) e data de fim (desligamento). Se a \
         data de fim não for especificada ou estiver em branco, use o valor \"Atual\". \
         Ignore qualquer outra informação. Retorne os dados em formato JSON, como no \
         exemplo: {{\"experiences\": [{{\"company\": \"EMPRESA EXEMPLO\", \"jobTitle\": \
         \"CARGO EXEMPLO\", \"location\": \"CIDADE - UF\", \"startDate\": \"DD/MM/YYYY\", \
         \"endDate\": \"DD/MM/YYYY\"}}]}}\n\nAqui está o texto do PDF: {full_text}"
    )
}

/// Prompt for extracting a full resume from arbitrary resume text.
pub fn extract_resume_prompt(resume_text: &str) -> String {
    format!(
        "Você é um assistente de RH especialista em extrair dados de currículos.\n\
         Analise o texto do currículo fornecido e retorne **apenas** um objeto JSON.\n\n\
         A estrutura do JSON deve seguir este formato (use `null` ou arrays vazios `[]` \
         para campos não encontrados):\n\
         {{\n\
           \"personalInfo\": {{ \"name\": \"string\", \"jobTitle\": \"string\", \"email\": \"string\", \"phone\": \"string\", \"address\": \"string\" }},\n\
           \"summary\": \"string\",\n\
           \"experiences\": [{{ \"jobTitle\": \"string\", \"company\": \"string\", \"location\": \"string\", \"startDate\": \"string\", \"endDate\": \"string\", \"description\": \"string\" }}],\n\
           \"education\": [{{ \"degree\": \"string\", \"institution\": \"string\", \"startDate\": \"string\", \"endDate\": \"string\" }}],\n\
           \"courses\": [{{ \"name\": \"string\", \"institution\": \"string\", \"completionDate\": \"string\" }}],\n\
           \"languages\": [{{ \"language\": \"string\", \"proficiency\": \"string\" }}],\n\
           \"skills\": [\"string\"]\n\
         }}\n\n\
         Tente preencher o máximo de campos possível com base no texto.\n\
         Para datas, tente formatar como \"Mês Ano\" (ex: \"Jan 2020\") ou \"Ano\" (ex: \"2020\").\n\
         Não inclua ```json ou qualquer outro texto antes ou depois do objeto JSON.\n\n\
         Texto do Currículo para Análise:\n---\n{resume_text}\n---"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_skills_prompt_embeds_inputs() {
        let prompt = suggest_skills_prompt("Desenvolvedor", "construí APIs");
        assert!(prompt.contains("\"Desenvolvedor\""));
        assert!(prompt.contains("construí APIs"));
    }

    #[test]
    fn test_extract_work_history_prompt_requires_atual_fallback() {
        let prompt = extract_work_history_prompt("texto");
        assert!(prompt.contains("\"Atual\""));
        assert!(prompt.ends_with("Aqui está o texto do PDF: texto"));
    }
}
